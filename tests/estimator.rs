use rdfwire::{
    BindingFormat, QuadFormat, SerializationFactory, TripleFormat,
    model::{Binding, GraphName, Quad, Term, Triple},
};

fn lit(lex: &str) -> Term {
    Term::Literal {
        lex: lex.into(),
        dt: None,
        lang: None,
    }
}

#[test]
fn estimates_are_nonzero_and_grow_with_lexical_length() {
    let small = Triple {
        s: Term::Iri("http://ex/s".into()),
        p: Term::Iri("http://ex/p".into()),
        o: lit("v"),
    };
    let large = Triple {
        s: Term::Iri("http://ex/s".into()),
        p: Term::Iri("http://ex/p".into()),
        o: lit(&"v".repeat(1000)),
    };
    let a = TripleFormat::estimated_size(&small);
    let b = TripleFormat::estimated_size(&large);
    assert!(a > 0);
    assert!(b >= a + 999);
}

#[test]
fn datatype_and_language_add_weight() {
    let plain = Triple {
        s: Term::Iri("http://ex/s".into()),
        p: Term::Iri("http://ex/p".into()),
        o: lit("v"),
    };
    let typed = Triple {
        o: Term::Literal {
            lex: "v".into(),
            dt: Some("http://www.w3.org/2001/XMLSchema#integer".into()),
            lang: None,
        },
        ..plain.clone()
    };
    let tagged = Triple {
        o: Term::Literal {
            lex: "v".into(),
            dt: None,
            lang: Some("en".into()),
        },
        ..plain.clone()
    };
    assert!(TripleFormat::estimated_size(&typed) > TripleFormat::estimated_size(&plain));
    assert!(TripleFormat::estimated_size(&tagged) > TripleFormat::estimated_size(&plain));
}

#[test]
fn named_graph_never_estimates_below_default_graph() {
    let default = Quad {
        s: Term::Iri("http://ex/s".into()),
        p: Term::Iri("http://ex/p".into()),
        o: lit("v"),
        g: GraphName::DefaultGraph,
    };
    let named = Quad {
        g: GraphName::Iri("http://ex/g".into()),
        ..default.clone()
    };
    assert!(QuadFormat::estimated_size(&named) >= QuadFormat::estimated_size(&default));
}

#[test]
fn binding_subset_never_estimates_larger() {
    let mut small = Binding::new();
    small.set("x", Term::Iri("http://ex/1".into()));
    let mut large = small.clone();
    large.set("y", lit("value"));
    large.set("z", Term::BNode("n".into()));
    assert!(BindingFormat::estimated_size(&small) <= BindingFormat::estimated_size(&large));
    assert!(BindingFormat::estimated_size(&Binding::new()) <= BindingFormat::estimated_size(&small));
}

#[test]
fn quad_estimate_covers_its_triple_part() {
    let q = Quad {
        s: Term::BNode("n".into()),
        p: Term::Iri("http://ex/p".into()),
        o: lit("v"),
        g: GraphName::BNode("g".into()),
    };
    assert!(QuadFormat::estimated_size(&q) >= TripleFormat::estimated_size(&q.triple()));
}
