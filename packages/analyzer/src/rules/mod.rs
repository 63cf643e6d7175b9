//! Rule modules and their dispatch.
//!
//! Every rule declares the hooks it listens to; the engine walks a document
//! once and calls each enabled rule at the matching points.

pub mod binding;
pub mod component;
pub mod diagnostic;
pub mod engine;
pub mod structure;
pub mod unknown_member;
pub mod util;

use crate::config::{AnalyzerConfig, RuleDefaults, Severity};
use crate::context::discovery::ComponentDefinition;
use crate::html_node::{HtmlAttrAssignment, HtmlDocument, HtmlNode, HtmlNodeAttr};
use crate::schema::{HtmlMember, HtmlStore, HtmlTagView};
use anyhow::Context as _;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use ts::TypeChecker;

pub use diagnostic::{FixAction, LazyFix, RuleDiagnostic, RuleReport};
pub use engine::{RuleEngine, RuleRequest};

bitflags! {
    /// The walk points a rule listens to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RuleHooks: u8 {
        const NODE = 1;
        const ATTRIBUTE = 1 << 1;
        const ASSIGNMENT = 1 << 2;
        /// Component declarations rather than template markup.
        const MEMBER = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RuleMeta {
    pub id: &'static str,
    /// Lower runs first.
    pub priority: u8,
    pub defaults: RuleDefaults,
    pub hooks: RuleHooks,
}

impl RuleMeta {
    pub const fn new(id: &'static str, normal: Severity, strict: Severity, hooks: RuleHooks) -> Self {
        RuleMeta {
            id,
            priority: 100,
            defaults: RuleDefaults::new(normal, strict),
            hooks,
        }
    }

    pub const fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}

/// A single rule. Hooks not listed in `meta().hooks` are never called.
pub trait RuleModule {
    fn meta(&self) -> RuleMeta;

    fn visit_node(&self, _node: &HtmlNode, _ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    fn visit_attribute(&self, _attr: &HtmlNodeAttr, _ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    fn visit_assignment(
        &self,
        _attr: &HtmlNodeAttr,
        _assignment: &HtmlAttrAssignment,
        _ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn visit_component(
        &self,
        _definition: &ComponentDefinition,
        _ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    fn visit_member(
        &self,
        _definition: &ComponentDefinition,
        _member: &HtmlMember,
        _ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Shared state handed to every hook during one walk.
pub struct RuleContext<'a> {
    pub file_name: &'a str,
    pub document: Option<&'a HtmlDocument>,
    pub store: &'a HtmlStore,
    pub checker: &'a dyn TypeChecker,
    pub config: &'a AnalyzerConfig,
    /// Files reachable through imports from `file_name`. `None` when the
    /// import graph is not known.
    pub imported_files: Option<&'a HashSet<String>>,
    rule_id: &'static str,
    severity: Severity,
    views: HashMap<String, Rc<HtmlTagView>>,
    reports: Vec<RuleDiagnostic>,
    break_requested: bool,
}

impl<'a> RuleContext<'a> {
    pub(crate) fn new(request: &RuleRequest<'a>, document: Option<&'a HtmlDocument>) -> Self {
        RuleContext {
            file_name: request.file_name,
            document,
            store: request.store,
            checker: request.checker,
            config: request.config,
            imported_files: request.imported_files,
            rule_id: "",
            severity: Severity::Off,
            views: HashMap::new(),
            reports: Vec::new(),
            break_requested: false,
        }
    }

    pub(crate) fn enter_rule(&mut self, rule_id: &'static str, severity: Severity) {
        self.rule_id = rule_id;
        self.severity = severity;
    }

    pub fn rule_id(&self) -> &'static str {
        self.rule_id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn report(&mut self, report: RuleReport) {
        self.reports
            .push(RuleDiagnostic::from_report(self.rule_id, self.severity, report));
    }

    /// Stop the walk after the current hook returns.
    pub fn break_walk(&mut self) {
        self.break_requested = true;
    }

    pub(crate) fn is_break_requested(&self) -> bool {
        self.break_requested
    }

    pub(crate) fn take_reports(&mut self) -> Vec<RuleDiagnostic> {
        std::mem::take(&mut self.reports)
    }

    pub(crate) fn report_count(&self) -> usize {
        self.reports.len()
    }

    pub(crate) fn truncate_reports(&mut self, len: usize) {
        self.reports.truncate(len);
    }

    pub(crate) fn reports_since(&self, index: usize) -> &[RuleDiagnostic] {
        &self.reports[index.min(self.reports.len())..]
    }

    pub fn document(&self) -> anyhow::Result<&'a HtmlDocument> {
        self.document
            .context("rule needs an html document but runs over component declarations")
    }

    /// Merged schema view of a tag, cached for the walk.
    pub fn tag_view(&mut self, tag: &str) -> Rc<HtmlTagView> {
        let store = self.store;
        self.views
            .entry(tag.to_ascii_lowercase())
            .or_insert_with(|| Rc::new(store.query(tag)))
            .clone()
    }

    /// The node owning an attribute.
    pub fn owner(&self, attr: &HtmlNodeAttr) -> anyhow::Result<&'a HtmlNode> {
        Ok(self.document()?.node(attr.node))
    }
}

/// Every rule, in dispatch order.
pub fn default_rules() -> Vec<Box<dyn RuleModule>> {
    vec![
        Box::new(structure::NoUnclosedTag),
        Box::new(structure::NoUnknownTagName),
        Box::new(structure::NoMissingImport),
        Box::new(structure::NoUnknownSlot),
        Box::new(unknown_member::NoUnknownAttribute),
        Box::new(unknown_member::NoUnknownProperty),
        Box::new(unknown_member::NoUnknownEvent),
        Box::new(unknown_member::NoLegacyAttribute),
        Box::new(unknown_member::NoInvalidAttributeName),
        Box::new(binding::NoExpressionlessPropertyBinding),
        Box::new(binding::NoUnintendedMixedBinding),
        Box::new(binding::NoInvalidBooleanBinding),
        Box::new(binding::NoBooleanInAttributeBinding),
        Box::new(binding::NoComplexAttributeBinding),
        Box::new(binding::NoNullableAttributeBinding),
        Box::new(binding::NoIncompatibleTypeBinding),
        Box::new(binding::NoNoncallableEventBinding),
        Box::new(binding::NoInvalidDirectiveBinding),
        Box::new(component::NoInvalidTagName),
    ]
}
