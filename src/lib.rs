//! rdfwire — streaming text codec for RDF triples, quads, and query bindings.
//!
//! A thin, fast, round-trippable wire format for moving graph-data records
//! through ephemeral byte streams (spill files, sorted runs, worker pipes).
//! Blank-node identity is preserved within a single stream; the format makes
//! no promises across streams and is not meant for durable interchange.
//!
//! Quick start: encode triples, decode them back
//!
//! ```
//! use rdfwire::{SerializationFactory, TripleFormat, RecordSink, Term, Triple};
//!
//! let t = Triple {
//!     s: Term::Iri("http://example.org/s".into()),
//!     p: Term::Iri("http://example.org/p".into()),
//!     o: Term::Literal { lex: "0".into(), dt: None, lang: None },
//! };
//!
//! let mut sink = TripleFormat::serializer(Vec::new());
//! sink.send(&t).expect("send");
//! let bytes = sink.into_inner();
//!
//! let decoded: Vec<_> = TripleFormat::deserializer(&bytes[..])
//!     .collect::<rdfwire::Result<_>>()
//!     .expect("decode");
//! assert_eq!(decoded, vec![t]);
//! ```
//!
//! Each factory call allocates fresh session state, so independent streams
//! can be produced and consumed concurrently on separate threads. Within a
//! stream the same blank node always carries the same label; see
//! [`labels`] for the session scoping rules.

pub mod error;
pub mod factory;
pub mod labels;
pub mod model;
pub mod reader;
pub mod tokenizer;
pub mod writer;

pub use error::{Position, WireError};
pub use factory::{BindingFormat, QuadFormat, SerializationFactory, TripleFormat};
pub use model::{Binding, GraphName, Quad, Term, Triple};
pub use reader::{BindingSource, ParserProfile, QuadSource, TripleSource};
pub use writer::{BindingSink, QuadSink, RecordSink, TripleSink, WriterOptions};

/// Crate-level result type using the wire error.
pub type Result<T> = std::result::Result<T, error::WireError>;
