//! Layered HTML schema store.
//!
//! Collections are kept in an append-only log per source kind, keyed by
//! origin. Nothing is merged eagerly: every query walks the logs in priority
//! order (Discovered, User, Library, Builtin; latest absorbed first within a
//! kind) and the first record with a given name wins.

use super::html_tag::{
    HtmlDataCollection, HtmlDataSource, HtmlMember, HtmlMemberKind, HtmlTag, SourceKind,
};
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

#[derive(Debug, Clone)]
struct LogEntry {
    origin: String,
    collection: Rc<HtmlDataCollection>,
}

#[derive(Debug, Default)]
pub struct HtmlStore {
    logs: BTreeMap<SourceKind, Vec<LogEntry>>,
}

/// The merged view of one tag across every source.
#[derive(Debug, Clone)]
pub struct HtmlTagView {
    pub name: String,
    pub description: Option<String>,
    /// Every source that declares the tag, highest priority first.
    pub declared_by: Vec<HtmlDataSource>,
    members: Vec<HtmlMember>,
}

impl HtmlTagView {
    /// True when at least one source declares the tag itself, not just
    /// global members.
    pub fn is_known(&self) -> bool {
        !self.declared_by.is_empty()
    }

    /// The source that takes precedence for this tag.
    pub fn source(&self) -> Option<&HtmlDataSource> {
        self.declared_by.first()
    }

    pub fn members(&self, kind: HtmlMemberKind) -> impl Iterator<Item = &HtmlMember> {
        self.members.iter().filter(move |m| m.kind == kind)
    }

    /// Find a member by name. Attribute names compare case-insensitively.
    pub fn member(&self, kind: HtmlMemberKind, name: &str) -> Option<&HtmlMember> {
        self.members(kind).find(|m| member_name_matches(kind, &m.name, name))
    }

    pub fn attribute(&self, name: &str) -> Option<&HtmlMember> {
        self.member(HtmlMemberKind::Attribute, name)
    }

    pub fn property(&self, name: &str) -> Option<&HtmlMember> {
        self.member(HtmlMemberKind::Property, name)
    }

    pub fn event(&self, name: &str) -> Option<&HtmlMember> {
        self.member(HtmlMemberKind::Event, name)
    }

    pub fn slot(&self, name: &str) -> Option<&HtmlMember> {
        self.member(HtmlMemberKind::Slot, name)
    }

    pub fn member_names(&self, kind: HtmlMemberKind) -> Vec<&str> {
        self.members(kind).map(|m| m.name.as_str()).collect()
    }
}

fn member_name_matches(kind: HtmlMemberKind, declared: &str, name: &str) -> bool {
    match kind {
        HtmlMemberKind::Attribute => declared.eq_ignore_ascii_case(name),
        _ => declared == name,
    }
}

impl HtmlStore {
    pub fn new() -> Self {
        HtmlStore::default()
    }

    /// Add a collection. Absorbing the same origin again replaces the
    /// previous collection and moves it to the front of its kind.
    pub fn absorb(&mut self, kind: SourceKind, origin: &str, collection: HtmlDataCollection) {
        tracing::debug!(
            kind = %kind,
            origin,
            tags = collection.tags.len(),
            global = collection.global.len(),
            "absorbing html data"
        );
        let log = self.logs.entry(kind).or_default();
        log.retain(|entry| entry.origin != origin);
        log.push(LogEntry {
            origin: origin.to_string(),
            collection: Rc::new(collection),
        });
    }

    /// Drop the collection absorbed from `origin`. Returns whether one existed.
    pub fn forget(&mut self, kind: SourceKind, origin: &str) -> bool {
        let Some(log) = self.logs.get_mut(&kind) else {
            return false;
        };
        let before = log.len();
        log.retain(|entry| entry.origin != origin);
        let removed = log.len() != before;
        if removed {
            tracing::debug!(kind = %kind, origin, "forgot html data");
        }
        removed
    }

    /// Drop every collection of a source kind.
    pub fn forget_origin(&mut self, kind: SourceKind) {
        if let Some(log) = self.logs.remove(&kind) {
            tracing::debug!(kind = %kind, collections = log.len(), "forgot html data kind");
        }
    }

    pub fn has_origin(&self, kind: SourceKind, origin: &str) -> bool {
        self.logs
            .get(&kind)
            .map_or(false, |log| log.iter().any(|entry| entry.origin == origin))
    }

    pub fn origins(&self, kind: SourceKind) -> Vec<&str> {
        self.logs
            .get(&kind)
            .map(|log| log.iter().map(|entry| entry.origin.as_str()).collect())
            .unwrap_or_default()
    }

    /// Collections in query priority order.
    fn prioritized(&self) -> impl Iterator<Item = &HtmlDataCollection> {
        self.logs
            .iter()
            .rev()
            .flat_map(|(_, log)| log.iter().rev().map(|entry| entry.collection.as_ref()))
    }

    /// The merged view of `tag`. Unknown tags still get the global members.
    pub fn query(&self, tag: &str) -> HtmlTagView {
        let lower = tag.to_ascii_lowercase();
        let mut view = HtmlTagView {
            name: lower.clone(),
            description: None,
            declared_by: Vec::new(),
            members: Vec::new(),
        };
        let mut seen: HashSet<(HtmlMemberKind, String)> = HashSet::new();

        for collection in self.prioritized() {
            for declared in collection.tags.iter().filter(|t| t.name == lower) {
                if view.description.is_none() {
                    view.description = declared.description.clone();
                }
                view.declared_by.push(declared.source.clone());
                push_unseen(&mut view.members, &mut seen, declared.all_members());
            }
            push_unseen(&mut view.members, &mut seen, collection.global.iter());
        }
        view
    }

    /// Members that apply to every element, merged.
    pub fn global(&self) -> Vec<HtmlMember> {
        let mut members = Vec::new();
        let mut seen = HashSet::new();
        for collection in self.prioritized() {
            push_unseen(&mut members, &mut seen, collection.global.iter());
        }
        members
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let lower = tag.to_ascii_lowercase();
        self.prioritized()
            .any(|collection| collection.tags.iter().any(|t| t.name == lower))
    }

    /// Every declared tag name, sorted and deduplicated.
    pub fn tag_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .prioritized()
            .flat_map(|collection| collection.tag_names().map(str::to_string))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Tags declared by one origin, for per-file rules.
    pub fn tags_from_origin(&self, kind: SourceKind, origin: &str) -> Vec<&HtmlTag> {
        self.logs
            .get(&kind)
            .into_iter()
            .flatten()
            .filter(|entry| entry.origin == origin)
            .flat_map(|entry| entry.collection.tags.iter())
            .collect()
    }

    pub fn get_attribute(&self, tag: &str, name: &str) -> Option<HtmlMember> {
        self.query(tag).attribute(name).cloned()
    }

    pub fn get_property(&self, tag: &str, name: &str) -> Option<HtmlMember> {
        self.query(tag).property(name).cloned()
    }

    pub fn get_event(&self, tag: &str, name: &str) -> Option<HtmlMember> {
        self.query(tag).event(name).cloned()
    }
}

fn push_unseen<'a>(
    members: &mut Vec<HtmlMember>,
    seen: &mut HashSet<(HtmlMemberKind, String)>,
    candidates: impl Iterator<Item = &'a HtmlMember>,
) {
    for member in candidates {
        let key = match member.kind {
            HtmlMemberKind::Attribute => member.name.to_ascii_lowercase(),
            _ => member.name.clone(),
        };
        if seen.insert((member.kind, key)) {
            members.push(member.clone());
        }
    }
}
