//! Character constants shared by the template scanners.

pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const LF: char = '\n';
pub const FF: char = '\x0C';
pub const CR: char = '\r';
pub const SPACE: char = ' ';

pub const BANG: char = '!';
pub const DQ: char = '"';
pub const SQ: char = '\'';
pub const DOLLAR: char = '$';
pub const PERCENT: char = '%';
pub const SLASH: char = '/';
pub const COLON: char = ':';
pub const SEMICOLON: char = ';';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';
pub const QUESTION: char = '?';
pub const UNDERSCORE: char = '_';
pub const LBRACE: char = '{';
pub const RBRACE: char = '}';

/// HTML whitespace: space, tab, line feed, form feed and carriage return.
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, SPACE | TAB | LF | FF | CR)
}

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_ascii_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Check if character can start a JavaScript identifier
pub fn is_identifier_start(ch: char) -> bool {
    is_ascii_letter(ch) || ch == UNDERSCORE || ch == DOLLAR || (!ch.is_ascii() && ch.is_alphabetic())
}

/// Check if character can be part of a JavaScript identifier
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || is_digit(ch)
}

/// Characters that end a tag or attribute name in markup.
pub fn is_name_end(ch: char) -> bool {
    is_whitespace(ch) || ch == GT || ch == SLASH || ch == EQ || ch == EOF
}
