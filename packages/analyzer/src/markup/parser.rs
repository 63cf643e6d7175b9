//! Tree builder over the token stream.
//!
//! Handles void elements, implied end tags and self-closing syntax for
//! custom and foreign elements. Errors are recorded and never fatal.

use super::ast::{Attribute, Comment, Element, Node, Text};
use super::lexer::tokenize;
use super::tags::get_html_tag_definition;
use super::tokens::{Token, TokenType};
use crate::parse_util::{ParseError, Range};

#[derive(Debug, Clone, Default)]
pub struct ParseTreeResult {
    pub root_nodes: Vec<Node>,
    pub errors: Vec<ParseError>,
}

pub fn parse(source: &str) -> ParseTreeResult {
    let tokenized = tokenize(source);
    let mut builder = TreeBuilder::new(tokenized.tokens);
    builder.build();

    let mut errors = tokenized.errors;
    errors.extend(builder.errors);
    ParseTreeResult {
        root_nodes: builder.root_nodes,
        errors,
    }
}

struct TreeBuilder {
    tokens: Vec<Token>,
    index: usize,
    container_stack: Vec<Element>,
    root_nodes: Vec<Node>,
    errors: Vec<ParseError>,
}

impl TreeBuilder {
    fn new(tokens: Vec<Token>) -> Self {
        TreeBuilder {
            tokens,
            index: 0,
            container_stack: Vec::new(),
            root_nodes: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn build(&mut self) {
        while let Some(token) = self.advance() {
            match token.token_type {
                TokenType::TagOpenStart => self.consume_element_start_tag(token),
                TokenType::TagClose => self.consume_element_end_tag(token),
                TokenType::CommentStart => self.consume_comment(token),
                TokenType::CdataStart => self.consume_cdata(token),
                TokenType::Text | TokenType::RawText | TokenType::EscapableRawText => {
                    self.add_to_parent(Node::Text(Text {
                        value: token.value().to_string(),
                        source_span: token.range,
                    }))
                }
                TokenType::Eof => break,
                _ => {}
            }
        }

        while let Some(el) = self.container_stack.pop() {
            let el = self.close_implicitly(el);
            self.add_to_parent(Node::Element(el));
        }
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn peek_type(&self) -> Option<TokenType> {
        self.tokens.get(self.index).map(|t| t.token_type)
    }

    fn advance_if(&mut self, token_type: TokenType) -> Option<Token> {
        if self.peek_type() == Some(token_type) {
            self.advance()
        } else {
            None
        }
    }

    fn consume_comment(&mut self, start: Token) {
        let text = self.advance_if(TokenType::RawText);
        let end = self.advance_if(TokenType::CommentEnd);
        let end_offset = end
            .map(|t| t.range.end)
            .or_else(|| text.as_ref().map(|t| t.range.end))
            .unwrap_or(start.range.end);
        self.add_to_parent(Node::Comment(Comment {
            value: text.map(|t| t.value().to_string()).unwrap_or_default(),
            source_span: Range::new(start.range.start, end_offset),
        }));
    }

    fn consume_cdata(&mut self, start: Token) {
        let text = self.advance_if(TokenType::RawText);
        let end = self.advance_if(TokenType::CdataEnd);
        let end_offset = end
            .map(|t| t.range.end)
            .or_else(|| text.as_ref().map(|t| t.range.end))
            .unwrap_or(start.range.end);
        self.add_to_parent(Node::Text(Text {
            value: text.map(|t| t.value().to_string()).unwrap_or_default(),
            source_span: Range::new(start.range.start, end_offset),
        }));
    }

    fn consume_attr(&mut self, name_token: Token) -> Attribute {
        let mut end = name_token.range.end;
        let mut value = String::new();
        let mut value_span = None;

        if let Some(quote) = self.advance_if(TokenType::AttrQuote) {
            end = quote.range.end;
        }
        if let Some(text) = self.advance_if(TokenType::AttrValueText) {
            end = text.range.end;
            value = text.value().to_string();
            value_span = Some(text.range);
        }
        if let Some(quote) = self.advance_if(TokenType::AttrQuote) {
            end = quote.range.end;
        }

        Attribute {
            name: name_token.value().to_string(),
            value,
            source_span: Range::new(name_token.range.start, end),
            name_span: name_token.range,
            value_span,
        }
    }

    fn consume_element_start_tag(&mut self, start_token: Token) {
        let mut attrs = Vec::new();
        let mut last_end = start_token.range.end;
        while let Some(name_token) = self.advance_if(TokenType::AttrName) {
            let attr = self.consume_attr(name_token);
            last_end = attr.source_span.end;
            attrs.push(attr);
        }

        let name = start_token.value().to_string();
        let lower_name = name.to_ascii_lowercase();
        let tag_def = get_html_tag_definition(&lower_name);

        let mut self_closing = false;
        if let Some(end) = self.advance_if(TokenType::TagOpenEndVoid) {
            last_end = end.range.end;
            self_closing = true;
        } else if let Some(end) = self.advance_if(TokenType::TagOpenEnd) {
            last_end = end.range.end;
        } else {
            self.add_error(format!("Unclosed start tag \"{}\"", name), start_token.range);
        }

        // Opening this element may end open elements with optional end tags.
        while let Some(parent) = self.container_stack.last() {
            if !get_html_tag_definition(&parent.lower_name()).is_closed_by_child(&lower_name) {
                break;
            }
            if let Some(parent) = self.container_stack.pop() {
                let parent = self.close_implicitly(parent);
                self.add_to_parent(Node::Element(parent));
            }
        }

        let in_foreign = tag_def.is_foreign_root
            || self
                .container_stack
                .iter()
                .any(|el| get_html_tag_definition(&el.lower_name()).is_foreign_root);

        if self_closing && !(tag_def.can_self_close || in_foreign) {
            self.add_error(
                format!("Only void, custom and foreign elements can be self closed \"{}\"", name),
                start_token.range,
            );
            self_closing = false;
        }

        let start_span = Range::new(start_token.range.start, last_end);
        let name_start = start_token.range.start + 1;
        let element = Element {
            name,
            attrs,
            children: Vec::new(),
            source_span: Some(start_span),
            start_source_span: Some(start_span),
            end_source_span: None,
            name_span: Some(Range::new(name_start, name_start + start_token.value().len())),
            is_void: tag_def.is_void,
            is_self_closing: self_closing,
        };

        if self_closing || tag_def.is_void {
            self.add_to_parent(Node::Element(element));
        } else {
            self.container_stack.push(element);
        }
    }

    fn consume_element_end_tag(&mut self, end_token: Token) {
        let lower_name = end_token.value().to_ascii_lowercase();

        if get_html_tag_definition(&lower_name).is_void {
            self.add_error(
                format!("Void elements do not have end tags \"{}\"", end_token.value()),
                end_token.range,
            );
            if lower_name == "br" {
                // `</br>` is treated as `<br>`.
                self.add_to_parent(Node::Element(Element::synthesized("br")));
            }
            return;
        }

        let match_index = self
            .container_stack
            .iter()
            .rposition(|el| el.lower_name() == lower_name);

        let Some(index) = match_index else {
            self.add_error(
                format!(
                    "Unexpected closing tag \"{}\". It may happen when the tag has already been closed by another tag.",
                    end_token.value()
                ),
                end_token.range,
            );
            if lower_name == "p" {
                // A stray `</p>` produces an empty paragraph.
                self.add_to_parent(Node::Element(Element::synthesized("p")));
            }
            return;
        };

        while self.container_stack.len() > index + 1 {
            if let Some(el) = self.container_stack.pop() {
                if !get_html_tag_definition(&el.lower_name()).closed_by_parent {
                    if let Some(span) = el.start_source_span {
                        self.add_error(format!("Unclosed element \"{}\"", el.name), span);
                    }
                }
                let el = self.close_implicitly(el);
                self.add_to_parent(Node::Element(el));
            }
        }

        if let Some(mut el) = self.container_stack.pop() {
            el.end_source_span = Some(end_token.range);
            el.source_span = el
                .start_source_span
                .map(|start| Range::new(start.start, end_token.range.end));
            self.add_to_parent(Node::Element(el));
        }
    }

    /// Close an element whose end tag is missing. Its span grows to cover
    /// its children.
    fn close_implicitly(&self, mut el: Element) -> Element {
        if let Some(start) = el.start_source_span {
            let end = el
                .children
                .iter()
                .filter_map(Node::source_span)
                .map(|span| span.end)
                .max()
                .unwrap_or(start.end)
                .max(start.end);
            el.source_span = Some(Range::new(start.start, end));
        }
        el
    }

    fn add_to_parent(&mut self, node: Node) {
        match self.container_stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root_nodes.push(node),
        }
    }

    fn add_error(&mut self, msg: String, range: Range) {
        self.errors.push(ParseError::new(range, msg));
    }
}
