//! Structural parser: markup tree to node arena.

use super::assignment::{element_expression, resolve};
use super::node::{
    AttrLocation, HtmlAttrKind, HtmlNode, HtmlNodeAttr, HtmlNodeKind, IgnoreDirective, NodeId,
    NodeLocation,
};
use crate::document::VirtualDocument;
use crate::markup::ast::{Attribute, Element, Node};
use crate::markup::{self, tags::get_html_tag_definition};
use crate::parse_util::{ParseError, Range};

const IGNORE_MARKERS: &[&str] = &["lit-analyzer-ignore-next-line", "template-analyzer-ignore"];

/// One parsed HTML template.
#[derive(Debug)]
pub struct HtmlDocument {
    document: VirtualDocument,
    nodes: Vec<HtmlNode>,
    roots: Vec<NodeId>,
    /// Markup errors in source offsets.
    errors: Vec<ParseError>,
}

impl HtmlDocument {
    pub fn virtual_document(&self) -> &VirtualDocument {
        &self.document
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &HtmlNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[HtmlNode] {
        &self.nodes
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn parent(&self, id: NodeId) -> Option<&HtmlNode> {
        self.node(id).parent.map(|parent| self.node(parent))
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &HtmlNode> {
        self.node(id).children.iter().map(move |child| self.node(*child))
    }

    /// Nodes in document order.
    pub fn iter(&self) -> impl Iterator<Item = &HtmlNode> {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.node(id).children.iter().rev().copied());
            Some(self.node(id))
        })
    }

    /// The innermost node whose span contains the source offset.
    pub fn node_at_offset(&self, offset: usize) -> Option<&HtmlNode> {
        self.iter()
            .filter(|node| node.location.node.start <= offset && offset < node.location.node.end)
            .last()
    }

    /// True when the node or one of its ancestors carries an ignore
    /// directive covering `rule_id`.
    pub fn is_ignored(&self, id: NodeId, rule_id: &str) -> bool {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.node(id);
            if node.ignore.as_ref().map_or(false, |d| d.suppresses(rule_id)) {
                return true;
            }
            current = node.parent;
        }
        false
    }
}

/// Parse the text of an HTML virtual document.
pub fn parse(document: VirtualDocument) -> HtmlDocument {
    let tree = markup::parse(document.text());
    let errors = tree
        .errors
        .iter()
        .map(|err| ParseError::new(document.to_source_range(err.range), err.msg.clone()))
        .collect();

    let mut builder = ArenaBuilder {
        document: &document,
        nodes: Vec::new(),
    };
    let roots = builder.add_children(&tree.root_nodes, None);
    let nodes = builder.nodes;

    tracing::trace!(
        file = document.file_name(),
        nodes = nodes.len(),
        "parsed html document"
    );

    HtmlDocument {
        document,
        nodes,
        roots,
        errors,
    }
}

struct ArenaBuilder<'a> {
    document: &'a VirtualDocument,
    nodes: Vec<HtmlNode>,
}

impl ArenaBuilder<'_> {
    fn add_children(&mut self, children: &[Node], parent: Option<NodeId>) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut pending_ignore: Option<IgnoreDirective> = None;

        for child in children {
            match child {
                Node::Comment(comment) => {
                    pending_ignore = parse_ignore_comment(&comment.value);
                }
                Node::Text(text) => {
                    if !text.value.trim().is_empty() {
                        pending_ignore = None;
                    }
                }
                Node::Element(element) => {
                    let ignore = pending_ignore.take();
                    if let Some(id) = self.add_element(element, parent, ignore) {
                        ids.push(id);
                    }
                }
            }
        }
        ids
    }

    fn add_element(
        &mut self,
        element: &Element,
        parent: Option<NodeId>,
        ignore: Option<IgnoreDirective>,
    ) -> Option<NodeId> {
        // Elements implied during error recovery have no place in the source.
        let (Some(span), Some(start_span), Some(name_span)) =
            (element.source_span, element.start_source_span, element.name_span)
        else {
            return None;
        };

        let tag_name = element.lower_name();
        let kind = HtmlNodeKind::for_tag(&tag_name);
        let id = NodeId(self.nodes.len());
        let self_closed = element.is_self_closing && element.children.is_empty() && start_span == span;

        let attributes = element
            .attrs
            .iter()
            .filter_map(|attr| self.build_attr(attr, id))
            .collect();

        self.nodes.push(HtmlNode {
            id,
            kind,
            written_name: element.name.clone(),
            is_void: get_html_tag_definition(&tag_name).is_void,
            tag_name,
            self_closed,
            parent,
            children: Vec::new(),
            attributes,
            location: NodeLocation {
                node: self.document.to_source_range(span),
                name: self.document.to_source_range(name_span),
                start_tag: self.document.to_source_range(start_span),
                end_tag: element.end_source_span.map(|r| self.document.to_source_range(r)),
            },
            ignore,
        });

        if kind.has_analyzed_children() {
            let children = self.add_children(&element.children, Some(id));
            self.nodes[id.0].children = children;
        }
        Some(id)
    }

    fn build_attr(&self, attr: &Attribute, node: NodeId) -> Option<HtmlNodeAttr> {
        if let Some(assignment) = element_expression(attr, self.document) {
            let range = self.document.to_source_range(attr.name_span);
            return Some(HtmlNodeAttr {
                node,
                kind: HtmlAttrKind::Attribute,
                name: String::new(),
                written_name: String::new(),
                modifier: None,
                location: AttrLocation {
                    attr: self.document.to_source_range(attr.source_span),
                    name: range,
                    modifier: None,
                },
                assignment,
            });
        }

        let (modifier, written_name) = split_modifier(&attr.name);
        let name_start = attr.name_span.start + modifier.map_or(0, char::len_utf8);
        let name_range = Range::new(name_start, attr.name_span.end.max(name_start));
        let assignment = resolve(attr, self.document)?;

        Some(HtmlNodeAttr {
            node,
            kind: HtmlAttrKind::from_modifier(modifier),
            name: written_name.to_ascii_lowercase(),
            written_name: written_name.to_string(),
            modifier,
            location: AttrLocation {
                attr: self.document.to_source_range(attr.source_span),
                name: self.document.to_source_range(name_range),
                modifier: modifier.map(|_| {
                    self.document
                        .to_source_range(Range::new(attr.name_span.start, name_start))
                }),
            },
            assignment,
        })
    }
}

fn split_modifier(name: &str) -> (Option<char>, &str) {
    let mut chars = name.chars();
    match chars.next() {
        Some(modifier @ ('.' | '?' | '@')) if name.len() > 1 => (Some(modifier), chars.as_str()),
        _ => (None, name),
    }
}

fn parse_ignore_comment(comment: &str) -> Option<IgnoreDirective> {
    let text = comment.trim();
    IGNORE_MARKERS.iter().find_map(|marker| {
        let rest = text.strip_prefix('@').unwrap_or(text).strip_prefix(marker)?;
        Some(IgnoreDirective {
            rules: rest.split_whitespace().map(str::to_string).collect(),
        })
    })
}
