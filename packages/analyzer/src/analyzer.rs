//! Host-facing entry points.

use crate::context::AnalyzerContext;
use crate::document::{find_tagged_templates, DocumentKind};
use crate::html_node::{self, HtmlDocument};
use crate::parse_util::Range;
use crate::rules::{FixAction, RuleDiagnostic, RuleEngine, RuleRequest};
use serde::Serialize;
use ts::{SourceFile, TypeChecker};

/// A fix offered for one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeFix {
    pub rule_id: &'static str,
    pub message: String,
    pub actions: Vec<FixAction>,
}

pub struct TemplateAnalyzer<'a> {
    context: &'a AnalyzerContext,
    checker: &'a dyn TypeChecker,
    engine: RuleEngine,
}

impl<'a> TemplateAnalyzer<'a> {
    pub fn new(context: &'a AnalyzerContext, checker: &'a dyn TypeChecker) -> Self {
        TemplateAnalyzer {
            context,
            checker,
            engine: RuleEngine::default(),
        }
    }

    pub fn with_engine(mut self, engine: RuleEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Parsed HTML templates of a file, in source order.
    pub fn html_documents(&self, file: &SourceFile) -> Vec<HtmlDocument> {
        find_tagged_templates(file, self.context.config())
            .into_iter()
            .filter(|document| document.kind() == DocumentKind::Html)
            .map(html_node::parse)
            .collect()
    }

    pub fn get_diagnostics_in_file(&self, file: &SourceFile) -> Vec<RuleDiagnostic> {
        let imported_files = self.context.imported_files(&file.file_name);
        let request = RuleRequest {
            file_name: &file.file_name,
            store: self.context.store(),
            checker: self.checker,
            config: self.context.config(),
            imported_files: imported_files.as_ref(),
        };

        let documents = self.html_documents(file);
        let mut diagnostics: Vec<RuleDiagnostic> = documents
            .iter()
            .flat_map(|document| self.engine.run_all(document, &request))
            .collect();
        diagnostics.extend(
            self.engine
                .run_on_components(self.context.definitions_in(&file.file_name), &request),
        );

        diagnostics.sort_by(|a, b| {
            a.location
                .start
                .cmp(&b.location.start)
                .then(a.location.end.cmp(&b.location.end))
                .then(a.rule_id.cmp(b.rule_id))
        });
        tracing::debug!(
            file = %file.file_name,
            templates = documents.len(),
            diagnostics = diagnostics.len(),
            "analyzed file"
        );
        diagnostics
    }

    /// Diagnostics whose location touches `range` (source offsets).
    pub fn get_diagnostics_in_range(&self, file: &SourceFile, range: Range) -> Vec<RuleDiagnostic> {
        self.get_diagnostics_in_file(file)
            .into_iter()
            .filter(|diagnostic| touches(&diagnostic.location, &range))
            .collect()
    }

    pub fn get_code_fixes_in_range(&self, file: &SourceFile, range: Range) -> Vec<CodeFix> {
        self.get_diagnostics_in_range(file, range)
            .into_iter()
            .filter(|diagnostic| diagnostic.fix.is_some())
            .map(|diagnostic| CodeFix {
                rule_id: diagnostic.rule_id,
                actions: diagnostic.fix_actions().to_vec(),
                message: diagnostic
                    .fix_message
                    .clone()
                    .unwrap_or_else(|| diagnostic.message.clone()),
            })
            .filter(|fix| !fix.actions.is_empty())
            .collect()
    }
}

/// Overlap, counting a cursor at either edge.
fn touches(location: &Range, range: &Range) -> bool {
    location.start <= range.end && range.start <= location.end
}
