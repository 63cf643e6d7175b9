//! Node and attribute arena produced by the structural parser.
//!
//! All ranges stored here are source-file offsets.

use crate::document::ExpressionPlaceholder;
use crate::parse_util::Range;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HtmlNodeKind {
    Element,
    /// `<style>`; its content is never parsed as markup.
    Style,
    /// `<svg>` and `<math>`; children are not analyzed.
    Foreign,
}

impl HtmlNodeKind {
    pub fn for_tag(tag_name: &str) -> Self {
        match tag_name {
            "style" => HtmlNodeKind::Style,
            "svg" | "math" => HtmlNodeKind::Foreign,
            _ => HtmlNodeKind::Element,
        }
    }

    pub fn has_analyzed_children(&self) -> bool {
        matches!(self, HtmlNodeKind::Element)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLocation {
    /// Start of the start tag to the end of the end tag, or of the last child
    /// when the end tag is missing.
    pub node: Range,
    pub name: Range,
    pub start_tag: Range,
    pub end_tag: Option<Range>,
}

/// Suppression requested by a comment right before a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IgnoreDirective {
    /// Rule ids listed after the marker; empty means every rule.
    pub rules: Vec<String>,
}

impl IgnoreDirective {
    pub fn suppresses(&self, rule_id: &str) -> bool {
        self.rules.is_empty() || self.rules.iter().any(|r| r == rule_id)
    }
}

#[derive(Debug)]
pub struct HtmlNode {
    pub id: NodeId,
    pub kind: HtmlNodeKind,
    /// Lower-cased tag name.
    pub tag_name: String,
    pub written_name: String,
    pub self_closed: bool,
    pub is_void: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub attributes: Vec<HtmlNodeAttr>,
    pub location: NodeLocation,
    pub ignore: Option<IgnoreDirective>,
}

impl HtmlNode {
    pub fn attribute(&self, name: &str) -> Option<&HtmlNodeAttr> {
        self.attributes
            .iter()
            .find(|attr| attr.kind == HtmlAttrKind::Attribute && attr.name == name.to_ascii_lowercase())
    }

    /// A static `slot="..."` value.
    pub fn slot_name(&self) -> Option<&str> {
        match &self.attribute("slot")?.assignment {
            HtmlAttrAssignment::String { value, .. } => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn is_custom_element(&self) -> bool {
        self.tag_name.contains('-')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HtmlAttrKind {
    Attribute,
    Property,
    BooleanAttribute,
    EventListener,
}

impl HtmlAttrKind {
    pub fn from_modifier(modifier: Option<char>) -> Self {
        match modifier {
            Some('.') => HtmlAttrKind::Property,
            Some('?') => HtmlAttrKind::BooleanAttribute,
            Some('@') => HtmlAttrKind::EventListener,
            _ => HtmlAttrKind::Attribute,
        }
    }

    pub fn modifier(&self) -> Option<char> {
        match self {
            HtmlAttrKind::Attribute => None,
            HtmlAttrKind::Property => Some('.'),
            HtmlAttrKind::BooleanAttribute => Some('?'),
            HtmlAttrKind::EventListener => Some('@'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrLocation {
    /// The whole attribute, modifier and value included.
    pub attr: Range,
    /// The name without its modifier.
    pub name: Range,
    pub modifier: Option<Range>,
}

#[derive(Debug)]
pub struct HtmlNodeAttr {
    pub node: NodeId,
    pub kind: HtmlAttrKind,
    /// Lower-cased name without modifier.
    pub name: String,
    /// Name as written, without modifier.
    pub written_name: String,
    pub modifier: Option<char>,
    pub location: AttrLocation,
    pub assignment: HtmlAttrAssignment,
}

impl HtmlNodeAttr {
    /// Name with its modifier, as written.
    pub fn written_full_name(&self) -> String {
        match self.modifier {
            Some(modifier) => format!("{}{}", modifier, self.written_name),
            None => self.written_name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum MixedPart {
    Literal(String),
    Expression(Rc<ExpressionPlaceholder>),
}

#[derive(Debug, Clone)]
pub enum HtmlAttrAssignment {
    /// No `=value`.
    Boolean,
    String {
        value: String,
        location: Range,
    },
    Expression {
        placeholder: Rc<ExpressionPlaceholder>,
        location: Range,
    },
    Mixed {
        parts: Vec<MixedPart>,
        location: Range,
    },
    /// An interpolation in attribute name position.
    ElementExpression {
        placeholder: Rc<ExpressionPlaceholder>,
        location: Range,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentKind {
    Boolean,
    String,
    Expression,
    Mixed,
    ElementExpression,
}

impl fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssignmentKind::Boolean => "BOOLEAN",
            AssignmentKind::String => "STRING",
            AssignmentKind::Expression => "EXPRESSION",
            AssignmentKind::Mixed => "MIXED",
            AssignmentKind::ElementExpression => "ELEMENT_EXPRESSION",
        };
        write!(f, "{}", name)
    }
}

impl HtmlAttrAssignment {
    pub fn kind(&self) -> AssignmentKind {
        match self {
            HtmlAttrAssignment::Boolean => AssignmentKind::Boolean,
            HtmlAttrAssignment::String { .. } => AssignmentKind::String,
            HtmlAttrAssignment::Expression { .. } => AssignmentKind::Expression,
            HtmlAttrAssignment::Mixed { .. } => AssignmentKind::Mixed,
            HtmlAttrAssignment::ElementExpression { .. } => AssignmentKind::ElementExpression,
        }
    }

    /// Source span of the value. `Boolean` has none.
    pub fn location(&self) -> Option<Range> {
        match self {
            HtmlAttrAssignment::Boolean => None,
            HtmlAttrAssignment::String { location, .. }
            | HtmlAttrAssignment::Expression { location, .. }
            | HtmlAttrAssignment::Mixed { location, .. }
            | HtmlAttrAssignment::ElementExpression { location, .. } => Some(*location),
        }
    }

    pub fn placeholder(&self) -> Option<&Rc<ExpressionPlaceholder>> {
        match self {
            HtmlAttrAssignment::Expression { placeholder, .. }
            | HtmlAttrAssignment::ElementExpression { placeholder, .. } => Some(placeholder),
            _ => None,
        }
    }

    pub fn placeholders(&self) -> Vec<&Rc<ExpressionPlaceholder>> {
        match self {
            HtmlAttrAssignment::Mixed { parts, .. } => parts
                .iter()
                .filter_map(|part| match part {
                    MixedPart::Expression(placeholder) => Some(placeholder),
                    MixedPart::Literal(_) => None,
                })
                .collect(),
            other => other.placeholder().into_iter().collect(),
        }
    }
}
