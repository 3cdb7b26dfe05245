use rdfwire::{
    BindingFormat, QuadFormat, RecordSink, SerializationFactory, Term, Triple, TripleFormat,
    WireError,
};

fn first_error(bytes: &[u8]) -> WireError {
    let mut src = TripleFormat::deserializer(bytes);
    for item in &mut src {
        if let Err(e) = item {
            return e;
        }
    }
    panic!("stream decoded cleanly");
}

#[test]
fn junk_only_stream_errors_before_any_record() {
    let mut src = TripleFormat::deserializer(&b"hello world this is not rdf"[..]);
    match src.next() {
        Some(Err(WireError::Syntax { .. })) => {}
        other => panic!("expected syntax error first, got {:?}", other),
    }
    // the source is exhausted after the failure
    assert!(src.next().is_none());
}

#[test]
fn binary_junk_is_a_lexical_error() {
    match first_error(b"\x01\x02\x03") {
        WireError::Lexical { .. } => {}
        other => panic!("expected lexical error, got {:?}", other),
    }
}

#[test]
fn valid_records_then_junk_yield_records_then_one_error() {
    let bytes = b"<http://ex/s1> <http://ex/p> \"v1\" .\n\
        <http://ex/s2> <http://ex/p> \"v2\" .\n\
        garbage trailing text";
    let mut src = TripleFormat::deserializer(&bytes[..]);
    let mut ok = 0;
    let mut errs = 0;
    for item in &mut src {
        match item {
            Ok(_) => ok += 1,
            Err(_) => errs += 1,
        }
    }
    assert_eq!(ok, 2);
    assert_eq!(errs, 1);
    assert!(src.next().is_none());
}

#[test]
fn truncation_mid_record_is_premature_eof() {
    match first_error(b"<http://ex/s> <http://ex/p>") {
        WireError::UnexpectedEof { .. } => {}
        other => panic!("expected premature EOF, got {:?}", other),
    }
    // clean end between records is not an error
    let src = TripleFormat::deserializer(&b"<http://ex/s> <http://ex/p> \"v\" .\n"[..]);
    assert_eq!(src.filter_map(Result::ok).count(), 1);
}

#[test]
fn unterminated_literal_is_lexical_with_position() {
    let bytes = b"<http://ex/s> <http://ex/p> \"v\" .\n<http://ex/s> <http://ex/p> \"oops\nmore";
    match first_error(bytes) {
        WireError::Lexical { pos, message } => {
            assert!(message.contains("unterminated"));
            assert_eq!(pos.line, 2);
        }
        other => panic!("expected lexical error, got {:?}", other),
    }
}

#[test]
fn bad_escape_is_lexical() {
    match first_error(b"<http://ex/s> <http://ex/p> \"a\\qb\" .") {
        WireError::Lexical { message, .. } => assert!(message.contains("escape")),
        other => panic!("expected lexical error, got {:?}", other),
    }
}

#[test]
fn missing_object_is_a_syntax_error() {
    match first_error(b"<http://ex/s> <http://ex/p> .") {
        WireError::Syntax { .. } => {}
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn literal_subject_is_a_syntax_error_on_decode() {
    match first_error(b"\"v\" <http://ex/p> \"w\" .") {
        WireError::Syntax { message, .. } => assert!(message.contains("subject")),
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn quad_with_two_graph_terms_is_rejected() {
    let bytes = b"<http://ex/s> <http://ex/p> \"v\" <http://ex/g> <http://ex/g2> .";
    let mut src = QuadFormat::deserializer(&bytes[..]);
    match src.next() {
        Some(Err(WireError::Syntax { .. })) => {}
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn unknown_binding_directive_is_rejected() {
    let mut src = BindingFormat::deserializer(&b"PREFIX ex: <http://ex/> .\n"[..]);
    match src.next() {
        Some(Err(WireError::Syntax { message, .. })) => assert!(message.contains("PREFIX")),
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn short_binding_row_is_rejected() {
    let bytes = b"VARS ?x ?y .\n<http://ex/1> .\n";
    let mut src = BindingFormat::deserializer(&bytes[..]);
    match src.next() {
        Some(Err(WireError::Syntax { .. })) => {}
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn literal_subject_is_invalid_on_encode() {
    let t = Triple {
        s: Term::Literal {
            lex: "v".into(),
            dt: None,
            lang: None,
        },
        p: Term::Iri("http://ex/p".into()),
        o: Term::Iri("http://ex/o".into()),
    };
    let mut sink = TripleFormat::serializer(Vec::new());
    match sink.send(&t) {
        Err(WireError::Invalid(m)) => assert!(m.contains("subject")),
        other => panic!("expected Invalid, got {:?}", other),
    }
    // nothing reached the output
    assert!(sink.into_inner().is_empty());
}

#[test]
fn literal_with_datatype_and_language_is_invalid() {
    let t = Triple {
        s: Term::Iri("http://ex/s".into()),
        p: Term::Iri("http://ex/p".into()),
        o: Term::Literal {
            lex: "v".into(),
            dt: Some("http://ex/dt".into()),
            lang: Some("en".into()),
        },
    };
    let mut sink = TripleFormat::serializer(Vec::new());
    assert!(matches!(sink.send(&t), Err(WireError::Invalid(_))));
}

struct FailingWriter;

impl std::io::Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ))
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_failure_propagates_io_error() {
    let t = Triple {
        s: Term::Iri("http://ex/s".into()),
        p: Term::Iri("http://ex/p".into()),
        o: Term::Iri("http://ex/o".into()),
    };
    let mut sink = TripleFormat::serializer(FailingWriter);
    match sink.send(&t) {
        Err(WireError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe),
        other => panic!("expected io error, got {:?}", other),
    }
}
