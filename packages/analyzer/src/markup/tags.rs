//! HTML tag definitions used by the tree builder.

use crate::schema::dom_schema::DOM_SCHEMA;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagContentType {
    RawText,
    EscapableRawText,
    ParsableData,
}

#[derive(Debug, Clone)]
pub struct HtmlTagDefinition {
    closed_by_children: HashSet<&'static str>,
    pub content_type: TagContentType,
    /// The end tag may be omitted; the parent's end closes the element.
    pub closed_by_parent: bool,
    pub is_void: bool,
    /// Starts a foreign (SVG or MathML) subtree.
    pub is_foreign_root: bool,
    pub can_self_close: bool,
}

impl HtmlTagDefinition {
    pub fn new() -> Self {
        HtmlTagDefinition {
            closed_by_children: HashSet::new(),
            content_type: TagContentType::ParsableData,
            closed_by_parent: false,
            is_void: false,
            is_foreign_root: false,
            can_self_close: false,
        }
    }

    pub fn with_void(mut self) -> Self {
        self.is_void = true;
        self.closed_by_parent = true;
        self.can_self_close = true;
        self
    }

    pub fn with_closed_by_children(mut self, children: &[&'static str]) -> Self {
        self.closed_by_children.extend(children.iter().copied());
        self
    }

    pub fn with_closed_by_parent(mut self) -> Self {
        self.closed_by_parent = true;
        self
    }

    pub fn with_content_type(mut self, content_type: TagContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn with_foreign_root(mut self) -> Self {
        self.is_foreign_root = true;
        self.can_self_close = true;
        self
    }

    pub fn with_can_self_close(mut self, can_self_close: bool) -> Self {
        self.can_self_close = can_self_close;
        self
    }

    /// Whether opening `name` implicitly ends this element.
    pub fn is_closed_by_child(&self, name: &str) -> bool {
        self.is_void || self.closed_by_children.contains(name)
    }
}

impl Default for HtmlTagDefinition {
    fn default() -> Self {
        Self::new()
    }
}

const P_CLOSERS: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "div", "dl", "fieldset", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "hr",
    "main", "menu", "nav", "ol", "p", "pre", "section", "table", "ul",
];

static TAG_DEFINITIONS: Lazy<HashMap<&'static str, HtmlTagDefinition>> = Lazy::new(|| {
    let mut defs = HashMap::new();

    for name in [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ] {
        defs.insert(name, HtmlTagDefinition::new().with_void());
    }

    defs.insert(
        "p",
        HtmlTagDefinition::new()
            .with_closed_by_children(P_CLOSERS)
            .with_closed_by_parent(),
    );

    defs.insert("thead", HtmlTagDefinition::new().with_closed_by_children(&["tbody", "tfoot"]).with_closed_by_parent());
    defs.insert("tbody", HtmlTagDefinition::new().with_closed_by_children(&["tbody", "tfoot"]).with_closed_by_parent());
    defs.insert("tfoot", HtmlTagDefinition::new().with_closed_by_children(&["tbody"]).with_closed_by_parent());
    defs.insert("tr", HtmlTagDefinition::new().with_closed_by_children(&["tr"]).with_closed_by_parent());
    defs.insert("td", HtmlTagDefinition::new().with_closed_by_children(&["td", "th"]).with_closed_by_parent());
    defs.insert("th", HtmlTagDefinition::new().with_closed_by_children(&["td", "th"]).with_closed_by_parent());
    defs.insert("li", HtmlTagDefinition::new().with_closed_by_children(&["li"]).with_closed_by_parent());
    defs.insert("dt", HtmlTagDefinition::new().with_closed_by_children(&["dt", "dd"]).with_closed_by_parent());
    defs.insert("dd", HtmlTagDefinition::new().with_closed_by_children(&["dt", "dd"]).with_closed_by_parent());
    defs.insert("rb", HtmlTagDefinition::new().with_closed_by_children(&["rb", "rt", "rtc", "rp"]).with_closed_by_parent());
    defs.insert("rt", HtmlTagDefinition::new().with_closed_by_children(&["rb", "rt", "rtc", "rp"]).with_closed_by_parent());
    defs.insert("rtc", HtmlTagDefinition::new().with_closed_by_children(&["rb", "rtc", "rp"]).with_closed_by_parent());
    defs.insert("rp", HtmlTagDefinition::new().with_closed_by_children(&["rb", "rt", "rtc", "rp"]).with_closed_by_parent());
    defs.insert("optgroup", HtmlTagDefinition::new().with_closed_by_children(&["optgroup"]).with_closed_by_parent());
    defs.insert("option", HtmlTagDefinition::new().with_closed_by_children(&["option", "optgroup"]).with_closed_by_parent());
    defs.insert("colgroup", HtmlTagDefinition::new().with_closed_by_children(&["colgroup", "thead", "tbody", "tfoot", "tr"]).with_closed_by_parent());
    defs.insert("caption", HtmlTagDefinition::new().with_closed_by_parent());
    defs.insert("html", HtmlTagDefinition::new().with_closed_by_parent());
    defs.insert("head", HtmlTagDefinition::new().with_closed_by_children(&["body"]).with_closed_by_parent());
    defs.insert("body", HtmlTagDefinition::new().with_closed_by_parent());

    defs.insert("svg", HtmlTagDefinition::new().with_foreign_root());
    defs.insert("math", HtmlTagDefinition::new().with_foreign_root());

    defs.insert("style", HtmlTagDefinition::new().with_content_type(TagContentType::RawText));
    defs.insert("script", HtmlTagDefinition::new().with_content_type(TagContentType::RawText));
    defs.insert("title", HtmlTagDefinition::new().with_content_type(TagContentType::EscapableRawText));
    defs.insert("textarea", HtmlTagDefinition::new().with_content_type(TagContentType::EscapableRawText));

    // Every other element the DOM schema knows is a regular element that may
    // not be self closed.
    for name in DOM_SCHEMA.html_element_names() {
        defs.entry(name).or_insert_with(HtmlTagDefinition::new);
    }

    defs
});

/// Unknown tags (custom elements) may be self closed.
static DEFAULT_TAG_DEFINITION: Lazy<HtmlTagDefinition> =
    Lazy::new(|| HtmlTagDefinition::new().with_can_self_close(true));

pub fn get_html_tag_definition(tag_name: &str) -> &'static HtmlTagDefinition {
    TAG_DEFINITIONS
        .get(tag_name)
        .or_else(|| TAG_DEFINITIONS.get(tag_name.to_ascii_lowercase().as_str()))
        .unwrap_or(&DEFAULT_TAG_DEFINITION)
}
