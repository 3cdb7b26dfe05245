//! Capability-indexed construction of matched sink/source pairs.
//!
//! One stateless factory per record kind. Construction never fails —
//! failures surface on first use of the sink or source. The factories are
//! the intended entry point for callers moving records through ephemeral
//! byte streams, e.g. an external merge sort spilling sorted runs to disk.

use std::io::{Read, Write};
use std::mem;

use crate::error::Result;
use crate::model::{Binding, GraphName, Quad, Term, Triple};
use crate::reader::{BindingSource, QuadSource, TripleSource};
use crate::writer::{BindingSink, QuadSink, RecordSink, TripleSink};

/// Serializer/deserializer/estimator bundle for one record kind.
///
/// Factories are stateless and thread-safe; every call allocates fresh
/// session state (label tables), so independent sinks and sources may run
/// concurrently on separate threads. The sink and source objects themselves
/// are single-threaded and exclusively owned.
pub trait SerializationFactory {
    type Record;
    type Sink<W: Write>: RecordSink<Self::Record>;
    type Source<R: Read>: Iterator<Item = Result<Self::Record>>;

    /// Writer bound to `out`. Never fails to construct.
    fn serializer<W: Write>(out: W) -> Self::Sink<W>;

    /// Lazy, forward-only, finite sequence of records over `input`. Not
    /// restartable: exhausting or abandoning it does not rewind the stream.
    fn deserializer<R: Read>(input: R) -> Self::Source<R>;

    /// Cheap, non-authoritative estimate of the in-memory cost of `record`
    /// in bytes, for callers batching under a memory bound. Monotonic with
    /// record content: a record holding strictly less never estimates
    /// larger. Counts the value's own footprint plus every held string.
    fn estimated_size(record: &Self::Record) -> u64;
}

/// Factory for [`Triple`] streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct TripleFormat;

impl SerializationFactory for TripleFormat {
    type Record = Triple;
    type Sink<W: Write> = TripleSink<W>;
    type Source<R: Read> = TripleSource<R>;

    fn serializer<W: Write>(out: W) -> TripleSink<W> {
        TripleSink::new(out)
    }

    fn deserializer<R: Read>(input: R) -> TripleSource<R> {
        TripleSource::new(input)
    }

    fn estimated_size(t: &Triple) -> u64 {
        term_size(&t.s) + term_size(&t.p) + term_size(&t.o)
    }
}

/// Factory for [`Quad`] streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadFormat;

impl SerializationFactory for QuadFormat {
    type Record = Quad;
    type Sink<W: Write> = QuadSink<W>;
    type Source<R: Read> = QuadSource<R>;

    fn serializer<W: Write>(out: W) -> QuadSink<W> {
        QuadSink::new(out)
    }

    fn deserializer<R: Read>(input: R) -> QuadSource<R> {
        QuadSource::new(input)
    }

    fn estimated_size(q: &Quad) -> u64 {
        term_size(&q.s) + term_size(&q.p) + term_size(&q.o) + graph_size(&q.g)
    }
}

/// Factory for [`Binding`] streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindingFormat;

impl SerializationFactory for BindingFormat {
    type Record = Binding;
    type Sink<W: Write> = BindingSink<W>;
    type Source<R: Read> = BindingSource<R>;

    fn serializer<W: Write>(out: W) -> BindingSink<W> {
        BindingSink::new(out)
    }

    fn deserializer<R: Read>(input: R) -> BindingSource<R> {
        BindingSource::new(input)
    }

    fn estimated_size(b: &Binding) -> u64 {
        let mut total = mem::size_of::<Binding>() as u64;
        for (var, term) in b.iter() {
            total += (mem::size_of::<String>() + var.len()) as u64 + term_size(term);
        }
        total
    }
}

fn term_size(t: &Term) -> u64 {
    let text = match t {
        Term::Iri(v) | Term::BNode(v) => v.len(),
        Term::Literal { lex, dt, lang } => {
            lex.len()
                + dt.as_ref().map_or(0, String::len)
                + lang.as_ref().map_or(0, String::len)
        }
    };
    (mem::size_of::<Term>() + text) as u64
}

fn graph_size(g: &GraphName) -> u64 {
    let text = match g {
        GraphName::Iri(v) | GraphName::BNode(v) => v.len(),
        GraphName::DefaultGraph => 0,
    };
    (mem::size_of::<GraphName>() + text) as u64
}
