//! Parse errors with byte offsets and rendered diagnostics

use crate::span::{ByteOffset, LineMap};
use atomspace::AtomSpaceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unterminated string starting at byte {start}")]
    UnterminatedString { start: ByteOffset, offset: ByteOffset },

    #[error("Invalid escape sequence `\\{found}` at byte {offset}")]
    InvalidEscape { found: char, offset: ByteOffset },

    #[error("Unexpected character '{found}' at byte {offset}")]
    UnexpectedChar { found: char, offset: ByteOffset },

    #[error("Unexpected token at byte {offset}: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        offset: ByteOffset,
    },

    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String, offset: ByteOffset },

    #[error("Unmatched `)` at byte {offset}")]
    UnmatchedClose { offset: ByteOffset },

    #[error("Missing atom type at byte {offset}")]
    EmptyType { offset: ByteOffset },

    #[error("Invalid atom type `{name}` at byte {offset}")]
    InvalidType { name: String, offset: ByteOffset },

    #[error("Unknown atom type `{name}` at byte {offset}")]
    UnknownType { name: String, offset: ByteOffset },

    #[error("Expression nested deeper than {limit} levels at byte {offset}")]
    TooDeep { limit: usize, offset: ByteOffset },

    #[error("Unexpected input after expression at byte {offset}")]
    TrailingInput { offset: ByteOffset },

    #[error("{source} (at byte {offset})")]
    Atom {
        offset: ByteOffset,
        source: AtomSpaceError,
    },
}

impl ParseError {
    pub fn unexpected_token(
        expected: impl Into<String>,
        found: impl Into<String>,
        offset: ByteOffset,
    ) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            offset,
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>, offset: ByteOffset) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
            offset,
        }
    }

    pub fn invalid_type(name: impl Into<String>, offset: ByteOffset) -> Self {
        Self::InvalidType {
            name: name.into(),
            offset,
        }
    }

    pub fn unknown_type(name: impl Into<String>, offset: ByteOffset) -> Self {
        Self::UnknownType {
            name: name.into(),
            offset,
        }
    }

    pub fn atom(source: AtomSpaceError, offset: ByteOffset) -> Self {
        Self::Atom { offset, source }
    }

    /// Byte offset the error points at
    pub fn offset(&self) -> ByteOffset {
        match self {
            Self::UnterminatedString { offset, .. }
            | Self::InvalidEscape { offset, .. }
            | Self::UnexpectedChar { offset, .. }
            | Self::UnexpectedToken { offset, .. }
            | Self::UnexpectedEof { offset, .. }
            | Self::UnmatchedClose { offset }
            | Self::EmptyType { offset }
            | Self::InvalidType { offset, .. }
            | Self::UnknownType { offset, .. }
            | Self::TooDeep { offset, .. }
            | Self::TrailingInput { offset }
            | Self::Atom { offset, .. } => *offset,
        }
    }

    /// Input ran out before the expression was complete
    pub fn is_eof(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedString { .. } | Self::UnexpectedEof { .. }
        )
    }

    /// Format the error with the offending source line and a caret
    pub fn render(&self, source: &str) -> String {
        let map = LineMap::new(source);
        let position = map.position(self.offset());
        let mut output = format!("error: {}\n  --> {}\n", self, position);
        if let Some(line) = map.line_text(position.line) {
            let number = (position.line + 1).to_string();
            let gutter = " ".repeat(number.len());
            output.push_str(&format!(" {} |\n", gutter));
            output.push_str(&format!(" {} | {}\n", number, line));
            output.push_str(&format!(
                " {} | {}^\n",
                gutter,
                " ".repeat(position.column)
            ));
        }
        output
    }
}
