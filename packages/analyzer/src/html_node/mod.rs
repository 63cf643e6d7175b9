//! Node and attribute tree of an HTML template, with binding kinds.

pub mod assignment;
pub mod node;
pub mod parser;

pub use node::{
    AssignmentKind, AttrLocation, HtmlAttrAssignment, HtmlAttrKind, HtmlNode, HtmlNodeAttr,
    HtmlNodeKind, IgnoreDirective, MixedPart, NodeId, NodeLocation,
};
pub use parser::{parse, HtmlDocument};
