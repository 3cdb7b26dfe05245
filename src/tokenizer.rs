//! Lexer for the tuple wire text.
//!
//! Works byte-at-a-time off a [`BufRead`] in a restricted mode: the input is
//! assumed to be an ASCII-safe byte stream (non-ASCII text travels either as
//! `\u`/`\U` escapes or as raw UTF-8 passed through inside IRIs and
//! literals). Tracks line and column for error reporting.

use std::io::BufRead;

use crate::error::{Position, Result, WireError};

/// One lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<...>` IRI reference, escapes decoded.
    Iri(String),
    /// `_:label` blank node label, without the prefix.
    BNode(String),
    /// Quoted literal with optional `@lang` or `^^<dt>` suffix.
    Literal {
        lex: String,
        dt: Option<String>,
        lang: Option<String>,
    },
    /// `?name` variable.
    Var(String),
    /// Bare keyword such as `VARS`.
    Word(String),
    /// `-`, the unbound-slot marker.
    Minus,
    /// `.`, the record terminator.
    Dot,
    /// Clean end of input between tokens.
    Eof,
}

impl Token {
    /// Short description for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::Iri(_) => "IRI",
            Token::BNode(_) => "blank node",
            Token::Literal { .. } => "literal",
            Token::Var(_) => "variable",
            Token::Word(_) => "keyword",
            Token::Minus => "'-'",
            Token::Dot => "'.'",
            Token::Eof => "end of input",
        }
    }
}

/// Streaming tokenizer over a byte source.
#[derive(Debug)]
pub struct Tokenizer<R: BufRead> {
    input: R,
    line: u64,
    col: u64,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(input: R) -> Self {
        Tokenizer {
            input,
            line: 1,
            col: 0,
        }
    }

    /// Current position, pointing just past the last consumed byte.
    pub fn pos(&self) -> Position {
        Position {
            line: self.line,
            col: self.col,
        }
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        let buf = self.input.fill_buf().map_err(WireError::Io)?;
        Ok(buf.first().copied())
    }

    fn bump(&mut self) -> Result<Option<u8>> {
        let b = self.peek()?;
        if let Some(b) = b {
            self.input.consume(1);
            if b == b'\n' {
                self.line += 1;
                self.col = 0;
            } else {
                self.col += 1;
            }
        }
        Ok(b)
    }

    fn lexical(&self, message: String) -> WireError {
        WireError::Lexical {
            pos: self.pos(),
            message,
        }
    }

    fn eof(&self) -> WireError {
        WireError::UnexpectedEof { pos: self.pos() }
    }

    /// Next token, skipping whitespace, blank lines, and `#` comments.
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            let b = match self.bump()? {
                Some(b) => b,
                None => return Ok(Token::Eof),
            };
            match b {
                b' ' | b'\t' | b'\r' | b'\n' => {}
                b'#' => self.skip_comment()?,
                b'<' => return Ok(Token::Iri(self.iri_body()?)),
                b'"' => return self.literal(),
                b'_' => return self.bnode(),
                b'?' => return self.variable(),
                b'.' => return Ok(Token::Dot),
                b'-' => return Ok(Token::Minus),
                b if b.is_ascii_alphabetic() => return self.word(b),
                other => {
                    return Err(self.lexical(format!("unexpected character 0x{:02x}", other)));
                }
            }
        }
    }

    fn skip_comment(&mut self) -> Result<()> {
        while let Some(b) = self.bump()? {
            if b == b'\n' {
                break;
            }
        }
        Ok(())
    }

    /// Body of an IRI ref; the opening `<` is already consumed.
    fn iri_body(&mut self) -> Result<String> {
        let start = self.pos();
        let mut bytes = Vec::new();
        loop {
            match self.bump()? {
                None => return Err(self.eof()),
                Some(b'>') => break,
                Some(b'\n') => {
                    return Err(WireError::Lexical {
                        pos: start,
                        message: "unterminated IRI".into(),
                    });
                }
                Some(b'\\') => self.unescape_into(&mut bytes, false)?,
                Some(b) => bytes.push(b),
            }
        }
        self.into_utf8(bytes)
    }

    fn literal(&mut self) -> Result<Token> {
        let start = self.pos();
        let mut bytes = Vec::new();
        loop {
            match self.bump()? {
                None => return Err(self.eof()),
                Some(b'"') => break,
                Some(b'\n') => {
                    return Err(WireError::Lexical {
                        pos: start,
                        message: "unterminated literal".into(),
                    });
                }
                Some(b'\\') => self.unescape_into(&mut bytes, true)?,
                Some(b) => bytes.push(b),
            }
        }
        let lex = self.into_utf8(bytes)?;
        match self.peek()? {
            Some(b'@') => {
                self.bump()?;
                let tag = self.take_while(|b| b.is_ascii_alphanumeric() || b == b'-')?;
                if tag.is_empty() {
                    return Err(self.lexical("empty language tag".into()));
                }
                Ok(Token::Literal {
                    lex,
                    dt: None,
                    lang: Some(self.into_utf8(tag)?),
                })
            }
            Some(b'^') => {
                self.bump()?;
                if self.bump()? != Some(b'^') {
                    return Err(self.lexical("expected '^^' before datatype".into()));
                }
                if self.bump()? != Some(b'<') {
                    return Err(self.lexical("expected IRI after '^^'".into()));
                }
                Ok(Token::Literal {
                    lex,
                    dt: Some(self.iri_body()?),
                    lang: None,
                })
            }
            _ => Ok(Token::Literal {
                lex,
                dt: None,
                lang: None,
            }),
        }
    }

    fn bnode(&mut self) -> Result<Token> {
        if self.bump()? != Some(b':') {
            return Err(self.lexical("expected ':' after '_'".into()));
        }
        match self.peek()? {
            Some(b) if b.is_ascii_alphanumeric() || b == b'_' => {}
            _ => return Err(self.lexical("missing blank node label".into())),
        }
        let label = self.take_while(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')?;
        self.into_utf8(label).map(Token::BNode)
    }

    fn variable(&mut self) -> Result<Token> {
        let name = self.take_while(|b| b.is_ascii_alphanumeric() || b == b'_')?;
        if name.is_empty() {
            return Err(self.lexical("empty variable name".into()));
        }
        self.into_utf8(name).map(Token::Var)
    }

    fn word(&mut self, first: u8) -> Result<Token> {
        let mut bytes = vec![first];
        bytes.extend(self.take_while(|b| b.is_ascii_alphabetic())?);
        self.into_utf8(bytes).map(Token::Word)
    }

    fn take_while(&mut self, keep: impl Fn(u8) -> bool) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        while let Some(b) = self.peek()? {
            if !keep(b) {
                break;
            }
            self.bump()?;
            out.push(b);
        }
        Ok(out)
    }

    /// Decode one backslash escape; the backslash is already consumed.
    fn unescape_into(&mut self, out: &mut Vec<u8>, in_literal: bool) -> Result<()> {
        let b = self.bump()?.ok_or_else(|| self.eof())?;
        let ch = match b {
            b'u' => self.hex_escape(4)?,
            b'U' => self.hex_escape(8)?,
            b't' if in_literal => '\t',
            b'b' if in_literal => '\u{8}',
            b'n' if in_literal => '\n',
            b'r' if in_literal => '\r',
            b'f' if in_literal => '\u{c}',
            b'"' if in_literal => '"',
            b'\'' if in_literal => '\'',
            b'\\' if in_literal => '\\',
            other => {
                return Err(self.lexical(format!("illegal escape '\\{}'", other as char)));
            }
        };
        let mut tmp = [0u8; 4];
        out.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
        Ok(())
    }

    fn hex_escape(&mut self, digits: u32) -> Result<char> {
        let mut v: u32 = 0;
        for _ in 0..digits {
            let b = self.bump()?.ok_or_else(|| self.eof())?;
            let d = (b as char)
                .to_digit(16)
                .ok_or_else(|| self.lexical(format!("bad hex digit '{}' in escape", b as char)))?;
            v = v * 16 + d;
        }
        char::from_u32(v)
            .ok_or_else(|| self.lexical(format!("escape {:#x} is not a valid code point", v)))
    }

    fn into_utf8(&self, bytes: Vec<u8>) -> Result<String> {
        String::from_utf8(bytes).map_err(|_| self.lexical("invalid UTF-8 in token".into()))
    }
}
