//! Component discovery boundary.

use crate::error::Result;
use crate::parse_util::Range;
use crate::schema::{HtmlDataCollection, HtmlDataSource, HtmlMember, HtmlMemberKind, HtmlTag, SourceKind};
use ts::{Program, SourceFile};

/// Where a member of a component was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberLocation {
    pub kind: HtmlMemberKind,
    pub name: String,
    pub range: Range,
}

/// A custom element declared in a source file.
#[derive(Debug, Clone)]
pub struct ComponentDefinition {
    pub tag_name: String,
    pub file_name: String,
    /// Span of the tag name literal, e.g. inside `customElements.define("...")`.
    pub tag_name_range: Option<Range>,
    pub declaration: HtmlTag,
    pub member_locations: Vec<MemberLocation>,
}

impl ComponentDefinition {
    pub fn new(tag_name: impl Into<String>, file_name: impl Into<String>) -> Self {
        let tag_name = tag_name.into();
        let file_name = file_name.into();
        let source = HtmlDataSource::new(SourceKind::Discovered, file_name.clone());
        ComponentDefinition {
            declaration: HtmlTag::new(tag_name.clone(), source),
            tag_name,
            file_name,
            tag_name_range: None,
            member_locations: Vec::new(),
        }
    }

    pub fn with_tag_name_range(mut self, range: Range) -> Self {
        self.tag_name_range = Some(range);
        self
    }

    /// Declare a member. The member's source and owning tag are filled in.
    pub fn with_member(mut self, member: HtmlMember, range: Option<Range>) -> Self {
        let mut member = member;
        member.source = self.declaration.source.clone();
        member.from_tag = Some(self.declaration.name.clone());
        if let Some(range) = range {
            self.member_locations.push(MemberLocation {
                kind: member.kind,
                name: member.name.clone(),
                range,
            });
        }
        self.declaration.add_member(member);
        self
    }

    pub fn member_location(&self, kind: HtmlMemberKind, name: &str) -> Option<Range> {
        self.member_locations
            .iter()
            .find(|loc| loc.kind == kind && loc.name == name)
            .map(|loc| loc.range)
    }
}

/// What discovery found in one file.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryResult {
    pub definitions: Vec<ComponentDefinition>,
    /// Members declared for every element, e.g. global event maps.
    pub global: Vec<HtmlMember>,
    /// Files whose change invalidates this result.
    pub dependencies: Vec<String>,
}

impl DiscoveryResult {
    pub fn into_collection(self) -> HtmlDataCollection {
        HtmlDataCollection {
            tags: self.definitions.into_iter().map(|d| d.declaration).collect(),
            global: self.global,
        }
    }
}

/// Finds custom element declarations in a file.
pub trait ComponentDiscovery {
    fn discover(&self, file: &SourceFile, program: &dyn Program) -> Result<DiscoveryResult>;
}
