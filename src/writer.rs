//! Encode path: records to wire text.
//!
//! Each sink serializes one record per [`RecordSink::send`] call. The record
//! is formatted into a per-record buffer first — resolving blank nodes
//! through the session [`LabelEncoder`] — and reaches the output through a
//! single `write_all`, so a record either lands whole or not at all. A sink
//! that has returned an error must not be used again.

use std::io::Write;

use crate::error::{Result, WireError};
use crate::labels::LabelEncoder;
use crate::model::{Binding, GraphName, Quad, Term, Triple};

/// One-record-at-a-time serializer bound to one output stream.
///
/// Blank-node labels are consistent for the lifetime of one sink and only
/// there: two sinks assign labels independently even for the same nodes.
pub trait RecordSink<T> {
    /// Serialize one record to the underlying stream.
    fn send(&mut self, record: &T) -> Result<()>;
    /// Flush the underlying stream.
    fn flush(&mut self) -> Result<()>;
}

/// Options controlling text emission.
#[derive(Debug, Clone, Copy)]
pub struct WriterOptions {
    /// Escape everything non-ASCII as `\u`/`\U`. Off, raw UTF-8 is emitted
    /// instead; the tokenizer accepts both.
    pub ascii: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions { ascii: true }
    }
}

/// Sink writing `<s> <p> <o> .` lines.
#[derive(Debug)]
pub struct TripleSink<W: Write> {
    out: W,
    labels: LabelEncoder,
    opts: WriterOptions,
    buf: Vec<u8>,
}

impl<W: Write> TripleSink<W> {
    pub fn new(out: W) -> Self {
        TripleSink::with_options(out, WriterOptions::default())
    }

    pub fn with_options(out: W, opts: WriterOptions) -> Self {
        TripleSink {
            out,
            labels: LabelEncoder::new(),
            opts,
            buf: Vec::new(),
        }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink<Triple> for TripleSink<W> {
    fn send(&mut self, t: &Triple) -> Result<()> {
        self.buf.clear();
        emit_subject(&mut self.buf, &t.s, &mut self.labels, self.opts)?;
        self.buf.push(b' ');
        emit_predicate(&mut self.buf, &t.p, &mut self.labels, self.opts)?;
        self.buf.push(b' ');
        emit_term(&mut self.buf, &t.o, &mut self.labels, self.opts)?;
        self.buf.extend_from_slice(b" .\n");
        self.out.write_all(&self.buf).map_err(WireError::Io)
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(WireError::Io)
    }
}

/// Sink writing `<s> <p> <o> [<g>] .` lines; the graph term is omitted for
/// the default graph.
#[derive(Debug)]
pub struct QuadSink<W: Write> {
    out: W,
    labels: LabelEncoder,
    opts: WriterOptions,
    buf: Vec<u8>,
}

impl<W: Write> QuadSink<W> {
    pub fn new(out: W) -> Self {
        QuadSink::with_options(out, WriterOptions::default())
    }

    pub fn with_options(out: W, opts: WriterOptions) -> Self {
        QuadSink {
            out,
            labels: LabelEncoder::new(),
            opts,
            buf: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink<Quad> for QuadSink<W> {
    fn send(&mut self, q: &Quad) -> Result<()> {
        self.buf.clear();
        emit_subject(&mut self.buf, &q.s, &mut self.labels, self.opts)?;
        self.buf.push(b' ');
        emit_predicate(&mut self.buf, &q.p, &mut self.labels, self.opts)?;
        self.buf.push(b' ');
        emit_term(&mut self.buf, &q.o, &mut self.labels, self.opts)?;
        match &q.g {
            GraphName::DefaultGraph => {}
            GraphName::Iri(v) => {
                self.buf.push(b' ');
                emit_iri(&mut self.buf, v, self.opts);
            }
            GraphName::BNode(id) => {
                self.buf.push(b' ');
                emit_bnode(&mut self.buf, self.labels.label_for(id));
            }
        }
        self.buf.extend_from_slice(b" .\n");
        self.out.write_all(&self.buf).map_err(WireError::Io)
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(WireError::Io)
    }
}

/// Sink writing self-describing binding rows.
///
/// A `VARS ?a ?b .` header line declares the columns; it is re-emitted
/// whenever a record binds a variable the current header does not cover.
/// Rows carry one term per declared variable, `-` for unbound slots.
#[derive(Debug)]
pub struct BindingSink<W: Write> {
    out: W,
    labels: LabelEncoder,
    opts: WriterOptions,
    buf: Vec<u8>,
    vars: Vec<String>,
}

impl<W: Write> BindingSink<W> {
    pub fn new(out: W) -> Self {
        BindingSink::with_options(out, WriterOptions::default())
    }

    pub fn with_options(out: W, opts: WriterOptions) -> Self {
        BindingSink {
            out,
            labels: LabelEncoder::new(),
            opts,
            buf: Vec::new(),
            vars: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink<Binding> for BindingSink<W> {
    fn send(&mut self, b: &Binding) -> Result<()> {
        for var in b.vars() {
            if var.is_empty() || !var.bytes().all(|c| c.is_ascii_alphanumeric() || c == b'_') {
                return Err(WireError::Invalid("malformed variable name"));
            }
        }
        self.buf.clear();
        let covered = |vars: &[String], v: &str| vars.iter().any(|h| h == v);
        if b.vars().any(|v| !covered(&self.vars, v)) {
            self.vars.clear();
            self.vars.extend(b.vars().map(str::to_string));
            self.buf.extend_from_slice(b"VARS");
            for var in &self.vars {
                self.buf.push(b' ');
                self.buf.push(b'?');
                self.buf.extend_from_slice(var.as_bytes());
            }
            self.buf.extend_from_slice(b" .\n");
        }
        for var in &self.vars {
            match b.get(var) {
                Some(t) => emit_term(&mut self.buf, t, &mut self.labels, self.opts)?,
                None => self.buf.push(b'-'),
            }
            self.buf.push(b' ');
        }
        self.buf.extend_from_slice(b".\n");
        self.out.write_all(&self.buf).map_err(WireError::Io)
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(WireError::Io)
    }
}

fn emit_subject(
    buf: &mut Vec<u8>,
    t: &Term,
    labels: &mut LabelEncoder,
    opts: WriterOptions,
) -> Result<()> {
    match t {
        Term::Literal { .. } => Err(WireError::Invalid("literal in subject position")),
        other => emit_term(buf, other, labels, opts),
    }
}

fn emit_predicate(
    buf: &mut Vec<u8>,
    t: &Term,
    labels: &mut LabelEncoder,
    opts: WriterOptions,
) -> Result<()> {
    match t {
        Term::Literal { .. } => Err(WireError::Invalid("literal in predicate position")),
        other => emit_term(buf, other, labels, opts),
    }
}

fn emit_term(
    buf: &mut Vec<u8>,
    t: &Term,
    labels: &mut LabelEncoder,
    opts: WriterOptions,
) -> Result<()> {
    match t {
        Term::Iri(v) => emit_iri(buf, v, opts),
        Term::BNode(id) => emit_bnode(buf, labels.label_for(id)),
        Term::Literal { lex, dt, lang } => {
            if dt.is_some() && lang.is_some() {
                return Err(WireError::Invalid("literal with both datatype and language tag"));
            }
            emit_lexical(buf, lex, opts);
            if let Some(lang) = lang {
                if lang.is_empty()
                    || !lang.bytes().all(|c| c.is_ascii_alphanumeric() || c == b'-')
                {
                    return Err(WireError::Invalid("malformed language tag"));
                }
                buf.push(b'@');
                buf.extend_from_slice(lang.as_bytes());
            } else if let Some(dt) = dt {
                buf.extend_from_slice(b"^^");
                emit_iri(buf, dt, opts);
            }
        }
    }
    Ok(())
}

fn emit_iri(buf: &mut Vec<u8>, iri: &str, opts: WriterOptions) {
    buf.push(b'<');
    for c in iri.chars() {
        match c {
            '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => push_uescape(buf, c),
            c if (c as u32) <= 0x20 => push_uescape(buf, c),
            c if c.is_ascii() => buf.push(c as u8),
            c if opts.ascii => push_uescape(buf, c),
            c => push_utf8(buf, c),
        }
    }
    buf.push(b'>');
}

fn emit_bnode(buf: &mut Vec<u8>, label: &str) {
    buf.extend_from_slice(b"_:");
    buf.extend_from_slice(label.as_bytes());
}

fn emit_lexical(buf: &mut Vec<u8>, lex: &str, opts: WriterOptions) {
    buf.push(b'"');
    for c in lex.chars() {
        match c {
            '"' => buf.extend_from_slice(b"\\\""),
            '\\' => buf.extend_from_slice(b"\\\\"),
            '\n' => buf.extend_from_slice(b"\\n"),
            '\r' => buf.extend_from_slice(b"\\r"),
            '\t' => buf.extend_from_slice(b"\\t"),
            c if (c as u32) < 0x20 => push_uescape(buf, c),
            c if c.is_ascii() => buf.push(c as u8),
            c if opts.ascii => push_uescape(buf, c),
            c => push_utf8(buf, c),
        }
    }
    buf.push(b'"');
}

fn push_uescape(buf: &mut Vec<u8>, c: char) {
    let v = c as u32;
    if v <= 0xFFFF {
        buf.extend_from_slice(format!("\\u{v:04X}").as_bytes());
    } else {
        buf.extend_from_slice(format!("\\U{v:08X}").as_bytes());
    }
}

fn push_utf8(buf: &mut Vec<u8>, c: char) {
    let mut tmp = [0u8; 4];
    buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
}

// ---------------- Oxigraph helpers ----------------

#[cfg(feature = "oxigraph")]
fn term_from_ox(t: &oxigraph::model::TermRef<'_>) -> Term {
    use oxigraph::model::TermRef as TR;
    match t {
        TR::NamedNode(n) => Term::Iri(n.as_str().to_string()),
        TR::BlankNode(b) => Term::BNode(b.as_str().to_string()),
        TR::Literal(l) => {
            let lex = l.value().to_string();
            if let Some(lang) = l.language() {
                Term::Literal {
                    lex,
                    dt: None,
                    lang: Some(lang.to_string()),
                }
            } else {
                Term::Literal {
                    lex,
                    dt: Some(l.datatype().as_str().to_string()),
                    lang: None,
                }
            }
        }
        _ => Term::Iri(t.to_string()),
    }
}

#[cfg(feature = "oxigraph")]
impl<W: Write> TripleSink<W> {
    /// Serialize every triple of an oxigraph [`Graph`](oxigraph::model::Graph)
    /// through this sink, in iteration order.
    pub fn send_oxigraph_graph(&mut self, graph: &oxigraph::model::Graph) -> Result<()> {
        use oxigraph::model::SubjectRef;
        for t in graph.iter() {
            let s = match &t.subject {
                SubjectRef::NamedNode(n) => Term::Iri(n.as_str().to_string()),
                SubjectRef::BlankNode(b) => Term::BNode(b.as_str().to_string()),
                _ => return Err(WireError::Invalid("unsupported subject kind")),
            };
            let p = Term::Iri(t.predicate.as_str().to_string());
            let o = term_from_ox(&t.object);
            self.send(&Triple { s, p, o })?;
        }
        Ok(())
    }
}
