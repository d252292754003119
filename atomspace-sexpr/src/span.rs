//! Byte offsets, spans and line/column mapping for diagnostics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte offset into the source text (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ByteOffset(pub usize);

impl ByteOffset {
    pub fn new(offset: usize) -> Self {
        ByteOffset(offset)
    }

    pub fn as_usize(self) -> usize {
        self.0
    }

    pub fn advance(self, by: usize) -> Self {
        ByteOffset(self.0 + by)
    }
}

impl fmt::Display for ByteOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Line and column (0-based internally, 1-based for display). Columns count
/// characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Half-open byte range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: ByteOffset,
    pub end: ByteOffset,
}

impl Span {
    pub fn new(start: ByteOffset, end: ByteOffset) -> Self {
        Span { start, end }
    }

    pub fn empty_at(offset: ByteOffset) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    pub fn len(self) -> usize {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// Combine two spans into a span that covers both
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start.0, self.end.0)
    }
}

/// Mapping from byte offsets to line/column positions
#[derive(Debug, Clone)]
pub struct LineMap<'a> {
    source: &'a str,
    /// Byte offsets of the start of each line
    line_starts: Vec<usize>,
}

impl<'a> LineMap<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (idx, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(idx + 1);
            }
        }
        LineMap {
            source,
            line_starts,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn position(&self, offset: ByteOffset) -> Position {
        let offset = offset.0.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };
        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        Position { line, column }
    }

    /// Text of the 0-based `line`, without its terminator
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.source.len(), |next| next - 1);
        self.source
            .get(start..end)
            .map(|text| text.strip_suffix('\r').unwrap_or(text))
    }
}
