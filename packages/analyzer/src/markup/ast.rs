//! Markup parse tree.
//!
//! Spans are document offsets. Elements synthesized during error recovery
//! (for example the `<p>` implied by a stray `</p>`) carry no spans at all.

use crate::parse_util::Range;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
}

impl Node {
    pub fn source_span(&self) -> Option<Range> {
        match self {
            Node::Element(el) => el.source_span,
            Node::Text(text) => Some(text.source_span),
            Node::Comment(comment) => Some(comment.source_span),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Name as written.
    pub name: String,
    pub value: String,
    /// From the first character of the name to the end of the value,
    /// closing quote included.
    pub source_span: Range,
    pub name_span: Range,
    pub value_span: Option<Range>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Name as written.
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    pub source_span: Option<Range>,
    pub start_source_span: Option<Range>,
    pub end_source_span: Option<Range>,
    pub name_span: Option<Range>,
    pub is_void: bool,
    /// Written as `<name />` and honored as such.
    pub is_self_closing: bool,
}

impl Element {
    /// An element implied by the parser with no counterpart in the source.
    pub fn synthesized(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
            source_span: None,
            start_source_span: None,
            end_source_span: None,
            name_span: None,
            is_void: false,
            is_self_closing: false,
        }
    }

    pub fn lower_name(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub value: String,
    pub source_span: Range,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub value: String,
    pub source_span: Range,
}

/// Depth-first visitor over the parse tree.
pub trait Visitor {
    fn visit_element(&mut self, element: &Element) {
        visit_all(self, &element.children);
    }
    fn visit_text(&mut self, _text: &Text) {}
    fn visit_comment(&mut self, _comment: &Comment) {}
}

pub fn visit_all<V: Visitor + ?Sized>(visitor: &mut V, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Element(el) => visitor.visit_element(el),
            Node::Text(text) => visitor.visit_text(text),
            Node::Comment(comment) => visitor.visit_comment(comment),
        }
    }
}
