//! Error and position types shared by the tokenizer, sources, and sinks.

use std::fmt;

/// Position within a wire stream: 1-based line, bytes consumed on that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u64,
    pub col: u64,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, col {}", self.line, self.col)
    }
}

/// Errors that can arise while encoding or decoding wire records.
#[derive(Debug)]
pub enum WireError {
    /// Underlying I/O error.
    Io(std::io::Error),
    /// Record cannot be expressed in the wire syntax.
    Invalid(&'static str),
    /// Malformed token in the input.
    Lexical { pos: Position, message: String },
    /// Tokens present but not forming a valid record.
    Syntax { pos: Position, message: String },
    /// Input ended in the middle of a record or token. Distinct from a
    /// clean end of input between records, which is not an error.
    UnexpectedEof { pos: Position },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::Io(e) => write!(f, "{}", e),
            WireError::Invalid(m) => write!(f, "{}", m),
            WireError::Lexical { pos, message } => write!(f, "{} at {}", message, pos),
            WireError::Syntax { pos, message } => write!(f, "{} at {}", message, pos),
            WireError::UnexpectedEof { pos } => write!(f, "unexpected end of input at {}", pos),
        }
    }
}

impl std::error::Error for WireError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WireError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WireError {
    fn from(e: std::io::Error) -> Self {
        WireError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, WireError>;
