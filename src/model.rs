//! Record types carried over the wire: terms, triples, quads, and bindings.
//!
//! Values are immutable once constructed. Blank-node identity is the id
//! string inside [`Term::BNode`]; it is meaningful only relative to the
//! session (one sink or one source) that produced it.

/// RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// IRI reference, taken as written (never resolved or validated).
    Iri(String),
    /// Blank node id, without the `_:` prefix.
    BNode(String),
    /// Literal with optional datatype or language tag. At most one of
    /// `dt`/`lang` may be set; a language-tagged literal leaves `dt` empty.
    Literal {
        lex: String,
        dt: Option<String>,
        lang: Option<String>,
    },
}

/// Graph component of a [`Quad`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GraphName {
    Iri(String),
    BNode(String),
    /// The unnamed default graph.
    DefaultGraph,
}

/// Subject/predicate/object triple.
///
/// Subject and predicate are restricted to [`Term::Iri`] and [`Term::BNode`];
/// the restriction is enforced when the triple crosses the wire, not at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject term.
    pub s: Term,
    /// Predicate term.
    pub p: Term,
    /// Object term.
    pub o: Term,
}

/// [`Triple`] plus the graph it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quad {
    pub s: Term,
    pub p: Term,
    pub o: Term,
    /// Graph name; [`GraphName::DefaultGraph`] for the unnamed graph.
    pub g: GraphName,
}

impl Quad {
    /// The triple part of this quad.
    pub fn triple(&self) -> Triple {
        Triple {
            s: self.s.clone(),
            p: self.p.clone(),
            o: self.o.clone(),
        }
    }
}

/// One query solution row: an ordered variable-to-term mapping.
///
/// Insertion order is significant for serialization (it drives the column
/// order of the emitted `VARS` header); equality is order-insensitive, since
/// decoding through a shared header can legitimately reorder columns. An
/// unbound variable is simply absent.
#[derive(Debug, Clone, Default, Eq)]
pub struct Binding {
    pairs: Vec<(String, Term)>,
}

impl Binding {
    pub fn new() -> Self {
        Binding { pairs: Vec::new() }
    }

    /// Bind `var` to `term`, replacing any existing entry for `var` in
    /// place. A binding never holds two entries for one variable.
    pub fn set(&mut self, var: &str, term: Term) {
        for (name, t) in &mut self.pairs {
            if name == var {
                *t = term;
                return;
            }
        }
        self.pairs.push((var.to_string(), term));
    }

    pub fn get(&self, var: &str) -> Option<&Term> {
        self.pairs
            .iter()
            .find(|(name, _)| name == var)
            .map(|(_, t)| t)
    }

    /// Variable names in insertion order.
    pub fn vars(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(name, _)| name.as_str())
    }

    /// `(variable, term)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.pairs.iter().map(|(name, t)| (name.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl PartialEq for Binding {
    fn eq(&self, other: &Self) -> bool {
        self.pairs.len() == other.pairs.len()
            && self
                .pairs
                .iter()
                .all(|(name, t)| other.get(name) == Some(t))
    }
}
