//! Schema records: tags and their members.

use once_cell::unsync::Lazy;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;
use ts::SimpleType;

/// Where a schema record came from. Later variants take precedence when
/// records for the same member name are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Builtin,
    Library,
    User,
    Discovered,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Builtin => write!(f, "builtin"),
            SourceKind::Library => write!(f, "library"),
            SourceKind::User => write!(f, "user"),
            SourceKind::Discovered => write!(f, "discovered"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HtmlDataSource {
    pub kind: SourceKind,
    /// Declaring file for discovered and library data; a label otherwise.
    pub origin: String,
}

impl HtmlDataSource {
    pub fn new(kind: SourceKind, origin: impl Into<String>) -> Self {
        HtmlDataSource {
            kind,
            origin: origin.into(),
        }
    }

    pub fn builtin() -> Self {
        HtmlDataSource::new(SourceKind::Builtin, "builtin")
    }

    pub fn user() -> Self {
        HtmlDataSource::new(SourceKind::User, "config")
    }
}

type TypeThunk = Box<dyn FnOnce() -> SimpleType>;

/// The declared type of a member, computed on first use when lazy.
#[derive(Clone, Default)]
pub enum MemberType {
    #[default]
    Unknown,
    Known(SimpleType),
    Lazy(Rc<Lazy<SimpleType, TypeThunk>>),
}

impl MemberType {
    pub fn lazy(thunk: impl FnOnce() -> SimpleType + 'static) -> Self {
        let thunk: TypeThunk = Box::new(thunk);
        MemberType::Lazy(Rc::new(Lazy::new(thunk)))
    }

    pub fn get(&self) -> Option<&SimpleType> {
        match self {
            MemberType::Unknown => None,
            MemberType::Known(ty) => Some(ty),
            MemberType::Lazy(lazy) => Some(Lazy::force(&**lazy)),
        }
    }
}

impl fmt::Debug for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberType::Unknown => write!(f, "Unknown"),
            MemberType::Known(ty) => write!(f, "Known({})", ty),
            MemberType::Lazy(lazy) => match Lazy::get(&**lazy) {
                Some(ty) => write!(f, "Lazy({})", ty),
                None => write!(f, "Lazy(<pending>)"),
            },
        }
    }
}

impl From<SimpleType> for MemberType {
    fn from(ty: SimpleType) -> Self {
        MemberType::Known(ty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HtmlMemberKind {
    Attribute,
    Property,
    Event,
    Slot,
    CssPart,
    CssProperty,
}

impl HtmlMemberKind {
    pub fn describe(&self) -> &'static str {
        match self {
            HtmlMemberKind::Attribute => "attribute",
            HtmlMemberKind::Property => "property",
            HtmlMemberKind::Event => "event",
            HtmlMemberKind::Slot => "slot",
            HtmlMemberKind::CssPart => "css part",
            HtmlMemberKind::CssProperty => "css property",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HtmlMember {
    pub kind: HtmlMemberKind,
    pub name: String,
    pub ty: MemberType,
    pub description: Option<String>,
    pub required: bool,
    /// Space separated token list, checked token by token.
    pub primitive_array: bool,
    /// Name of the tag that declared the member; `None` for global members.
    pub from_tag: Option<String>,
    pub source: HtmlDataSource,
}

impl HtmlMember {
    pub fn new(kind: HtmlMemberKind, name: impl Into<String>, source: HtmlDataSource) -> Self {
        HtmlMember {
            kind,
            name: name.into(),
            ty: MemberType::Unknown,
            description: None,
            required: false,
            primitive_array: false,
            from_tag: None,
            source,
        }
    }

    pub fn with_type(mut self, ty: impl Into<MemberType>) -> Self {
        self.ty = ty.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn primitive_array(mut self) -> Self {
        self.primitive_array = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn from_tag(mut self, tag: impl Into<String>) -> Self {
        self.from_tag = Some(tag.into());
        self
    }

    pub fn member_type(&self) -> Option<&SimpleType> {
        self.ty.get()
    }
}

/// All members declared for one tag by one source.
#[derive(Debug, Clone)]
pub struct HtmlTag {
    pub name: String,
    pub description: Option<String>,
    pub attributes: Vec<HtmlMember>,
    pub properties: Vec<HtmlMember>,
    pub events: Vec<HtmlMember>,
    pub slots: Vec<HtmlMember>,
    pub css_parts: Vec<HtmlMember>,
    pub css_properties: Vec<HtmlMember>,
    pub source: HtmlDataSource,
}

impl HtmlTag {
    pub fn new(name: impl Into<String>, source: HtmlDataSource) -> Self {
        HtmlTag {
            name: name.into().to_ascii_lowercase(),
            description: None,
            attributes: Vec::new(),
            properties: Vec::new(),
            events: Vec::new(),
            slots: Vec::new(),
            css_parts: Vec::new(),
            css_properties: Vec::new(),
            source,
        }
    }

    pub fn members(&self, kind: HtmlMemberKind) -> &[HtmlMember] {
        match kind {
            HtmlMemberKind::Attribute => &self.attributes,
            HtmlMemberKind::Property => &self.properties,
            HtmlMemberKind::Event => &self.events,
            HtmlMemberKind::Slot => &self.slots,
            HtmlMemberKind::CssPart => &self.css_parts,
            HtmlMemberKind::CssProperty => &self.css_properties,
        }
    }

    pub fn members_mut(&mut self, kind: HtmlMemberKind) -> &mut Vec<HtmlMember> {
        match kind {
            HtmlMemberKind::Attribute => &mut self.attributes,
            HtmlMemberKind::Property => &mut self.properties,
            HtmlMemberKind::Event => &mut self.events,
            HtmlMemberKind::Slot => &mut self.slots,
            HtmlMemberKind::CssPart => &mut self.css_parts,
            HtmlMemberKind::CssProperty => &mut self.css_properties,
        }
    }

    /// Add a member unless one with the same name and kind already exists.
    pub fn add_member(&mut self, member: HtmlMember) {
        let members = self.members_mut(member.kind);
        if !members.iter().any(|m| m.name == member.name) {
            members.push(member);
        }
    }

    /// Every member, attributes first.
    pub fn all_members(&self) -> impl Iterator<Item = &HtmlMember> {
        self.attributes
            .iter()
            .chain(&self.properties)
            .chain(&self.events)
            .chain(&self.slots)
            .chain(&self.css_parts)
            .chain(&self.css_properties)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
            && self.properties.is_empty()
            && self.events.is_empty()
            && self.slots.is_empty()
            && self.css_parts.is_empty()
            && self.css_properties.is_empty()
    }
}

/// A batch of schema data absorbed into the store at once.
#[derive(Debug, Clone, Default)]
pub struct HtmlDataCollection {
    pub tags: Vec<HtmlTag>,
    /// Members that apply to every element.
    pub global: Vec<HtmlMember>,
}

impl HtmlDataCollection {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.global.is_empty()
    }

    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.name.as_str())
    }
}

pub const ALL_MEMBER_KINDS: [HtmlMemberKind; 6] = [
    HtmlMemberKind::Attribute,
    HtmlMemberKind::Property,
    HtmlMemberKind::Event,
    HtmlMemberKind::Slot,
    HtmlMemberKind::CssPart,
    HtmlMemberKind::CssProperty,
];
