use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open byte range `[start, end)`.
///
/// Depending on the owner, offsets are relative to a virtual document's
/// text or to the whole source file; node and attribute spans produced by
/// the structural parser are always source-file relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "invalid range {}..{}", start, end);
        Range { start, end }
    }

    pub fn empty(at: usize) -> Self {
        Range { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when `offset` lies in `[start, end]`. The end is inclusive so a
    /// cursor placed right after a token still counts as touching it.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// True when the ranges share at least one position, or when an empty
    /// `other` sits inside `self`.
    pub fn intersects(&self, other: &Range) -> bool {
        if other.is_empty() || self.is_empty() {
            return self.contains(other.start) || other.contains(self.start);
        }
        self.start < other.end && other.start < self.end
    }

    pub fn intersection(&self, other: &Range) -> Option<Range> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(Range { start, end })
        } else {
            None
        }
    }

    pub fn offset_by(&self, delta: usize) -> Range {
        Range {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start..self.end).unwrap_or("")
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A recoverable error found while tokenizing or building a markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub range: Range,
    pub msg: String,
}

impl ParseError {
    pub fn new(range: Range, msg: impl Into<String>) -> Self {
        ParseError {
            range,
            msg: msg.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.msg, self.range)
    }
}
