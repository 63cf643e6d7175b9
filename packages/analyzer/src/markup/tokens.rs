//! Markup token definitions.

use crate::parse_util::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    TagOpenStart,
    TagOpenEnd,
    TagOpenEndVoid,
    TagClose,
    AttrName,
    AttrQuote,
    AttrValueText,
    Text,
    RawText,
    EscapableRawText,
    CommentStart,
    CommentEnd,
    CdataStart,
    CdataEnd,
    DocType,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub parts: Vec<String>,
    /// Document offsets of the token text.
    pub range: Range,
}

impl Token {
    pub fn new(token_type: TokenType, parts: Vec<String>, range: Range) -> Self {
        Token {
            token_type,
            parts,
            range,
        }
    }

    /// First part, or an empty string for tokens without parts.
    pub fn value(&self) -> &str {
        self.parts.first().map(String::as_str).unwrap_or("")
    }
}
