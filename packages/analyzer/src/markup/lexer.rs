//! HTML tokenizer.
//!
//! Produces a flat token stream with document offsets. Character references
//! are not decoded: the analyzer only needs spans and raw text.

use super::tags::{get_html_tag_definition, TagContentType};
use super::tokens::{Token, TokenType};
use crate::chars;
use crate::parse_util::{ParseError, Range};

#[derive(Debug, Clone, Default)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
}

pub fn tokenize(source: &str) -> TokenizeResult {
    let mut tokenizer = Tokenizer::new(source);
    tokenizer.tokenize();
    TokenizeResult {
        tokens: tokenizer.tokens,
        errors: tokenizer.errors,
    }
}

struct Tokenizer<'a> {
    input: &'a str,
    offset: usize,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
    current_token_start: Option<usize>,
    current_token_type: Option<TokenType>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            offset: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
            current_token_start: None,
            current_token_type: None,
        }
    }

    fn tokenize(&mut self) {
        while self.peek() != chars::EOF {
            let start = self.offset;

            if self.attempt_char_code(chars::LT) {
                if self.attempt_char_code(chars::BANG) {
                    if self.attempt_str("[CDATA[") {
                        self.consume_cdata(start);
                    } else if self.attempt_str("--") {
                        self.consume_comment(start);
                    } else {
                        self.consume_doc_type(start);
                    }
                } else if self.attempt_char_code(chars::SLASH) {
                    self.consume_tag_close(start);
                } else if self.peek() == chars::QUESTION {
                    self.consume_doc_type(start);
                } else if chars::is_ascii_letter(self.peek()) || self.peek() == chars::UNDERSCORE {
                    self.consume_tag_open(start);
                } else {
                    // A lone `<` is text.
                    self.consume_text(start);
                }
            } else {
                self.consume_text(start);
            }
        }

        self.begin_token(TokenType::Eof, self.offset);
        self.end_token(Vec::new());
    }

    fn peek(&self) -> char {
        self.input[self.offset..].chars().next().unwrap_or(chars::EOF)
    }

    fn peek_at(&self, skip: usize) -> char {
        self.input[self.offset..].chars().nth(skip).unwrap_or(chars::EOF)
    }

    fn advance(&mut self) {
        let ch = self.peek();
        if ch != chars::EOF {
            self.offset += ch.len_utf8();
        }
    }

    fn attempt_char_code(&mut self, char_code: char) -> bool {
        if self.peek() == char_code {
            self.advance();
            true
        } else {
            false
        }
    }

    fn attempt_str(&mut self, s: &str) -> bool {
        let rest = &self.input[self.offset..];
        if rest.get(..s.len()).map_or(false, |head| head.eq_ignore_ascii_case(s)) {
            self.offset += s.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while chars::is_whitespace(self.peek()) {
            self.advance();
        }
    }

    fn begin_token(&mut self, token_type: TokenType, start: usize) {
        self.current_token_type = Some(token_type);
        self.current_token_start = Some(start);
    }

    fn end_token(&mut self, parts: Vec<String>) {
        let start = self.current_token_start.take().unwrap_or(self.offset);
        let token_type = self.current_token_type.take().unwrap_or(TokenType::Eof);
        self.tokens
            .push(Token::new(token_type, parts, Range::new(start, self.offset)));
    }

    fn add_error(&mut self, msg: impl Into<String>, start: usize) {
        self.errors
            .push(ParseError::new(Range::new(start, self.offset), msg));
    }

    fn is_tag_start(&self) -> bool {
        if self.peek() != chars::LT {
            return false;
        }
        let next = self.peek_at(1);
        chars::is_ascii_letter(next)
            || next == chars::UNDERSCORE
            || next == chars::SLASH
            || next == chars::BANG
            || next == chars::QUESTION
    }

    /// Text up to the next tag start. `start` may lie before the cursor when
    /// a stray `<` was already consumed.
    fn consume_text(&mut self, start: usize) {
        self.begin_token(TokenType::Text, start);
        if self.offset == start {
            self.advance();
        }
        while self.peek() != chars::EOF && !self.is_tag_start() {
            self.advance();
        }
        let text = self.input[start..self.offset].to_string();
        self.end_token(vec![text]);
    }

    fn consume_until(&mut self, terminator: &str) -> (String, bool) {
        let start = self.offset;
        match self.input[start..].find(terminator) {
            Some(found) => {
                self.offset = start + found;
                (self.input[start..self.offset].to_string(), true)
            }
            None => {
                self.offset = self.input.len();
                (self.input[start..].to_string(), false)
            }
        }
    }

    fn consume_comment(&mut self, start: usize) {
        self.begin_token(TokenType::CommentStart, start);
        self.end_token(Vec::new());

        let content_start = self.offset;
        self.begin_token(TokenType::RawText, content_start);
        let (content, terminated) = self.consume_until("-->");
        self.end_token(vec![content]);

        if terminated {
            let end_start = self.offset;
            self.begin_token(TokenType::CommentEnd, end_start);
            self.offset += 3;
            self.end_token(Vec::new());
        } else {
            self.add_error("Unexpected character \"EOF\"", start);
        }
    }

    fn consume_cdata(&mut self, start: usize) {
        self.begin_token(TokenType::CdataStart, start);
        self.end_token(Vec::new());

        let content_start = self.offset;
        self.begin_token(TokenType::RawText, content_start);
        let (content, terminated) = self.consume_until("]]>");
        self.end_token(vec![content]);

        if terminated {
            let end_start = self.offset;
            self.begin_token(TokenType::CdataEnd, end_start);
            self.offset += 3;
            self.end_token(Vec::new());
        } else {
            self.add_error("Unexpected character \"EOF\"", start);
        }
    }

    /// `<!DOCTYPE ...>`, `<?...>` and other bogus comments.
    fn consume_doc_type(&mut self, start: usize) {
        self.begin_token(TokenType::DocType, start);
        let (content, terminated) = self.consume_until(">");
        if terminated {
            self.advance();
        }
        self.end_token(vec![content]);
    }

    fn consume_tag_open(&mut self, start: usize) {
        self.begin_token(TokenType::TagOpenStart, start);
        let name_start = self.offset;
        loop {
            let ch = self.peek();
            if chars::is_whitespace(ch) || ch == chars::SLASH || ch == chars::GT || ch == chars::LT || ch == chars::EOF {
                break;
            }
            self.advance();
        }
        let tag_name = self.input[name_start..self.offset].to_string();
        self.end_token(vec![tag_name.clone()]);

        self.skip_whitespace();
        while !self.is_attribute_terminator() {
            let before = self.offset;
            if self.peek() == chars::SLASH {
                // A `/` that does not end the tag is ignored.
                self.advance();
            } else if self.peek() == chars::LT {
                self.add_error("Unexpected character \"<\"", before);
                break;
            } else {
                self.consume_attribute();
            }
            if before == self.offset {
                self.advance();
            }
            self.skip_whitespace();
        }

        let ended = self.consume_tag_open_end(start);
        if ended == Some(TokenType::TagOpenEnd) {
            match get_html_tag_definition(&tag_name).content_type {
                TagContentType::RawText => {
                    self.consume_raw_text_with_tag_close(TokenType::RawText, &tag_name)
                }
                TagContentType::EscapableRawText => {
                    self.consume_raw_text_with_tag_close(TokenType::EscapableRawText, &tag_name)
                }
                TagContentType::ParsableData => {}
            }
        }
    }

    fn is_attribute_terminator(&self) -> bool {
        let ch = self.peek();
        ch == chars::GT
            || ch == chars::EOF
            || (ch == chars::SLASH && self.peek_at(1) == chars::GT)
    }

    fn consume_attribute(&mut self) {
        self.consume_attribute_name();
        let after_name = self.offset;
        self.skip_whitespace();
        if self.attempt_char_code(chars::EQ) {
            self.skip_whitespace();
            self.consume_attribute_value();
        } else {
            // Whitespace after a valueless attribute belongs to the tag.
            self.offset = after_name;
        }
    }

    fn consume_attribute_name(&mut self) {
        let start = self.offset;
        self.begin_token(TokenType::AttrName, start);
        // The first character is part of the name even if it is `=`.
        if self.peek() == chars::EQ {
            self.advance();
        }
        while !chars::is_name_end(self.peek()) && self.peek() != chars::LT {
            self.advance();
        }
        let name = self.input[start..self.offset].to_string();
        self.end_token(vec![name]);
    }

    fn consume_attribute_value(&mut self) {
        let quote = self.peek();
        if quote == chars::DQ || quote == chars::SQ {
            self.consume_quote(quote);
            let value_start = self.offset;
            self.begin_token(TokenType::AttrValueText, value_start);
            while self.peek() != quote && self.peek() != chars::EOF {
                self.advance();
            }
            let value = self.input[value_start..self.offset].to_string();
            self.end_token(vec![value]);
            if self.peek() == quote {
                self.consume_quote(quote);
            } else {
                self.add_error("Unterminated attribute value", value_start);
            }
        } else {
            let value_start = self.offset;
            self.begin_token(TokenType::AttrValueText, value_start);
            while !chars::is_whitespace(self.peek())
                && self.peek() != chars::GT
                && self.peek() != chars::EOF
            {
                self.advance();
            }
            let value = self.input[value_start..self.offset].to_string();
            self.end_token(vec![value]);
        }
    }

    fn consume_quote(&mut self, quote: char) {
        let start = self.offset;
        self.begin_token(TokenType::AttrQuote, start);
        self.advance();
        self.end_token(vec![quote.to_string()]);
    }

    fn consume_tag_open_end(&mut self, start: usize) -> Option<TokenType> {
        let end_start = self.offset;
        let token_type = if self.attempt_str("/>") {
            TokenType::TagOpenEndVoid
        } else if self.attempt_char_code(chars::GT) {
            TokenType::TagOpenEnd
        } else {
            self.add_error("Unexpected character \"EOF\"", start);
            return None;
        };
        self.begin_token(token_type, end_start);
        self.end_token(Vec::new());
        Some(token_type)
    }

    fn consume_tag_close(&mut self, start: usize) {
        self.begin_token(TokenType::TagClose, start);
        let name_start = self.offset;
        while !chars::is_name_end(self.peek()) && self.peek() != chars::LT {
            self.advance();
        }
        let name = self.input[name_start..self.offset].to_string();
        let (_, terminated) = self.consume_until(">");
        if terminated {
            self.advance();
        } else {
            self.add_error("Unexpected character \"EOF\"", start);
        }
        self.end_token(vec![name]);
    }

    fn consume_raw_text_with_tag_close(&mut self, token_type: TokenType, tag_name: &str) {
        let content_start = self.offset;
        self.begin_token(token_type, content_start);
        loop {
            if self.peek() == chars::EOF {
                break;
            }
            if self.is_closing_tag_match(tag_name) {
                break;
            }
            self.advance();
        }
        let content = self.input[content_start..self.offset].to_string();
        self.end_token(vec![content]);

        if self.peek() != chars::EOF {
            let close_start = self.offset;
            self.offset += 2;
            self.consume_tag_close(close_start);
        }
    }

    fn is_closing_tag_match(&self, tag_name: &str) -> bool {
        let rest = &self.input[self.offset..];
        if !rest.starts_with("</") {
            return false;
        }
        let after = &rest[2..];
        if !after
            .get(..tag_name.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(tag_name))
        {
            return false;
        }
        after[tag_name.len()..]
            .chars()
            .next()
            .map_or(true, chars::is_name_end)
    }
}
