//! Decode path: byte stream to records.
//!
//! Each source is a forward-only, finite cursor over one input stream. One
//! `next` call consumes exactly one record. Clean end of input between
//! records exhausts the iterator; a malformed record yields one `Err` and
//! permanently exhausts the source — there is no skip-and-resynchronize.
//! Sources are not restartable and never rewind the underlying stream.

use std::io::{BufRead, BufReader, Read};

use log::debug;

use crate::error::{Position, Result, WireError};
use crate::labels::LabelDecoder;
use crate::model::{Binding, GraphName, Quad, Term, Triple};
use crate::tokenizer::{Token, Tokenizer};

/// Minimal-validation parsing context shared by the record sources.
///
/// IRIs are taken as written (no base, no resolution), literals at face
/// value, and blank node labels are routed through a session-scoped
/// [`LabelDecoder`] so that one label names one identity for the lifetime
/// of the source that owns this profile.
#[derive(Debug, Default)]
pub struct ParserProfile {
    labels: LabelDecoder,
}

impl ParserProfile {
    pub fn new() -> Self {
        ParserProfile::default()
    }

    /// Turn a term token into a [`Term`].
    pub fn term_for(&mut self, tok: Token, pos: Position) -> Result<Term> {
        match tok {
            Token::Iri(v) => Ok(Term::Iri(v)),
            Token::BNode(label) => Ok(Term::BNode(self.labels.id_for(&label).to_string())),
            Token::Literal { lex, dt, lang } => Ok(Term::Literal { lex, dt, lang }),
            other => Err(WireError::Syntax {
                pos,
                message: format!("expected RDF term, found {}", other.describe()),
            }),
        }
    }

    /// Turn a graph-position token into a [`GraphName`].
    pub fn graph_for(&mut self, tok: Token, pos: Position) -> Result<GraphName> {
        match tok {
            Token::Iri(v) => Ok(GraphName::Iri(v)),
            Token::BNode(label) => Ok(GraphName::BNode(self.labels.id_for(&label).to_string())),
            other => Err(WireError::Syntax {
                pos,
                message: format!("{} cannot name a graph", other.describe()),
            }),
        }
    }
}

fn require<R: BufRead>(tokens: &mut Tokenizer<R>) -> Result<Token> {
    let tok = tokens.next_token()?;
    if tok == Token::Eof {
        return Err(WireError::UnexpectedEof { pos: tokens.pos() });
    }
    Ok(tok)
}

fn expect_dot<R: BufRead>(tokens: &mut Tokenizer<R>) -> Result<()> {
    let tok = require(tokens)?;
    if tok != Token::Dot {
        return Err(WireError::Syntax {
            pos: tokens.pos(),
            message: format!("expected '.' after record, found {}", tok.describe()),
        });
    }
    Ok(())
}

fn subject_term(profile: &mut ParserProfile, tok: Token, pos: Position) -> Result<Term> {
    match tok {
        Token::Iri(_) | Token::BNode(_) => profile.term_for(tok, pos),
        other => Err(WireError::Syntax {
            pos,
            message: format!("{} cannot be a subject", other.describe()),
        }),
    }
}

fn predicate_term(profile: &mut ParserProfile, tok: Token, pos: Position) -> Result<Term> {
    match tok {
        Token::Iri(_) | Token::BNode(_) => profile.term_for(tok, pos),
        other => Err(WireError::Syntax {
            pos,
            message: format!("{} cannot be a predicate", other.describe()),
        }),
    }
}

/// Forward-only source of [`Triple`]s decoded from a byte stream.
#[derive(Debug)]
pub struct TripleSource<R: Read> {
    tokens: Tokenizer<BufReader<R>>,
    profile: ParserProfile,
    done: bool,
}

impl<R: Read> TripleSource<R> {
    pub fn new(input: R) -> Self {
        TripleSource {
            tokens: Tokenizer::new(BufReader::new(input)),
            profile: ParserProfile::new(),
            done: false,
        }
    }

    fn read_record(&mut self) -> Result<Option<Triple>> {
        let tok = self.tokens.next_token()?;
        if tok == Token::Eof {
            return Ok(None);
        }
        let pos = self.tokens.pos();
        let s = subject_term(&mut self.profile, tok, pos)?;
        let tok = require(&mut self.tokens)?;
        let pos = self.tokens.pos();
        let p = predicate_term(&mut self.profile, tok, pos)?;
        let tok = require(&mut self.tokens)?;
        let pos = self.tokens.pos();
        let o = self.profile.term_for(tok, pos)?;
        expect_dot(&mut self.tokens)?;
        Ok(Some(Triple { s, p, o }))
    }
}

impl<R: Read> Iterator for TripleSource<R> {
    type Item = Result<Triple>;

    fn next(&mut self) -> Option<Result<Triple>> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(t)) => Some(Ok(t)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                debug!("triple stream terminated: {e}");
                Some(Err(e))
            }
        }
    }
}

/// Forward-only source of [`Quad`]s decoded from a byte stream.
///
/// The graph term trails the object; its absence means the default graph.
#[derive(Debug)]
pub struct QuadSource<R: Read> {
    tokens: Tokenizer<BufReader<R>>,
    profile: ParserProfile,
    done: bool,
}

impl<R: Read> QuadSource<R> {
    pub fn new(input: R) -> Self {
        QuadSource {
            tokens: Tokenizer::new(BufReader::new(input)),
            profile: ParserProfile::new(),
            done: false,
        }
    }

    fn read_record(&mut self) -> Result<Option<Quad>> {
        let tok = self.tokens.next_token()?;
        if tok == Token::Eof {
            return Ok(None);
        }
        let pos = self.tokens.pos();
        let s = subject_term(&mut self.profile, tok, pos)?;
        let tok = require(&mut self.tokens)?;
        let pos = self.tokens.pos();
        let p = predicate_term(&mut self.profile, tok, pos)?;
        let tok = require(&mut self.tokens)?;
        let pos = self.tokens.pos();
        let o = self.profile.term_for(tok, pos)?;
        let tok = require(&mut self.tokens)?;
        let g = match tok {
            Token::Dot => return Ok(Some(Quad { s, p, o, g: GraphName::DefaultGraph })),
            tok => {
                let pos = self.tokens.pos();
                self.profile.graph_for(tok, pos)?
            }
        };
        expect_dot(&mut self.tokens)?;
        Ok(Some(Quad { s, p, o, g }))
    }
}

impl<R: Read> Iterator for QuadSource<R> {
    type Item = Result<Quad>;

    fn next(&mut self) -> Option<Result<Quad>> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(q)) => Some(Ok(q)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                debug!("quad stream terminated: {e}");
                Some(Err(e))
            }
        }
    }
}

/// Forward-only source of [`Binding`]s decoded from a byte stream.
///
/// The stream is self-describing: `VARS ?a ?b .` directives declare the
/// columns in effect for the rows that follow, and `-` marks an unbound
/// slot, which leaves the variable absent from the decoded binding.
#[derive(Debug)]
pub struct BindingSource<R: Read> {
    tokens: Tokenizer<BufReader<R>>,
    profile: ParserProfile,
    vars: Vec<String>,
    done: bool,
}

impl<R: Read> BindingSource<R> {
    pub fn new(input: R) -> Self {
        BindingSource {
            tokens: Tokenizer::new(BufReader::new(input)),
            profile: ParserProfile::new(),
            vars: Vec::new(),
            done: false,
        }
    }

    fn read_record(&mut self) -> Result<Option<Binding>> {
        loop {
            let tok = self.tokens.next_token()?;
            match tok {
                Token::Eof => return Ok(None),
                Token::Word(w) if w == "VARS" => self.read_header()?,
                Token::Word(w) => {
                    return Err(WireError::Syntax {
                        pos: self.tokens.pos(),
                        message: format!("unknown directive '{w}'"),
                    });
                }
                first => return self.read_row(first).map(Some),
            }
        }
    }

    fn read_header(&mut self) -> Result<()> {
        let mut vars = Vec::new();
        loop {
            let tok = require(&mut self.tokens)?;
            match tok {
                Token::Var(name) => vars.push(name),
                Token::Dot => break,
                other => {
                    return Err(WireError::Syntax {
                        pos: self.tokens.pos(),
                        message: format!("expected variable or '.' in VARS, found {}", other.describe()),
                    });
                }
            }
        }
        self.vars = vars;
        Ok(())
    }

    fn read_row(&mut self, first: Token) -> Result<Binding> {
        let mut binding = Binding::new();
        let mut tok = first;
        for i in 0..self.vars.len() {
            let pos = self.tokens.pos();
            match tok {
                Token::Minus => {}
                Token::Dot => {
                    return Err(WireError::Syntax {
                        pos,
                        message: format!("row ends after {i} of {} terms", self.vars.len()),
                    });
                }
                t => {
                    let term = self.profile.term_for(t, pos)?;
                    binding.set(&self.vars[i], term);
                }
            }
            tok = require(&mut self.tokens)?;
        }
        if tok != Token::Dot {
            return Err(WireError::Syntax {
                pos: self.tokens.pos(),
                message: format!("expected '.' after row, found {}", tok.describe()),
            });
        }
        Ok(binding)
    }
}

impl<R: Read> Iterator for BindingSource<R> {
    type Item = Result<Binding>;

    fn next(&mut self) -> Option<Result<Binding>> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(b)) => Some(Ok(b)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                debug!("binding stream terminated: {e}");
                Some(Err(e))
            }
        }
    }
}
