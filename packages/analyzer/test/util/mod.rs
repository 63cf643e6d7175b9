#![allow(dead_code)]
#![allow(unused_imports)]

/**
 * Shared Test Utilities
 *
 * A map-backed type oracle, an in-memory program and helpers that wrap a
 * template in an `html` tagged literal and run it through the analyzer.
 */
use std::cell::Cell;
use std::collections::HashMap;

use template_analyzer::config::AnalyzerConfig;
use template_analyzer::context::{AnalyzerContext, ComponentDiscovery, DiscoveryResult};
use template_analyzer::document::find_tagged_templates;
use template_analyzer::html_node::{self, HtmlDocument, HtmlNode, HtmlNodeAttr};
use template_analyzer::rules::RuleDiagnostic;
use template_analyzer::TemplateAnalyzer;
use ts::{ExpressionRef, Program, SimpleType, SourceFile, TypeCheckError, TypeChecker};

/// Offset of the template content inside the source built by [`source_file`].
pub const TEMPLATE_START: usize = "html`".len();

/// Answers `type_of` from a map keyed by trimmed expression text. Literal
/// expressions (`"text"`, `12`, `true`) are typed without an entry.
#[derive(Debug, Default)]
pub struct MapTypeChecker {
    types: HashMap<String, SimpleType>,
}

impl MapTypeChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, expression: &str, ty: SimpleType) -> Self {
        self.types.insert(expression.to_string(), ty);
        self
    }
}

fn literal_type(text: &str) -> Option<SimpleType> {
    if text.len() >= 2 && (text.starts_with('"') && text.ends_with('"') || text.starts_with('\'') && text.ends_with('\'')) {
        return Some(SimpleType::string_literal(&text[1..text.len() - 1]));
    }
    match text {
        "true" => return Some(SimpleType::BooleanLiteral(true)),
        "false" => return Some(SimpleType::BooleanLiteral(false)),
        "null" => return Some(SimpleType::Null),
        "undefined" => return Some(SimpleType::Undefined),
        _ => {}
    }
    text.parse::<f64>().ok().map(SimpleType::NumberLiteral)
}

impl TypeChecker for MapTypeChecker {
    fn type_of(&self, expression: &ExpressionRef) -> Result<SimpleType, TypeCheckError> {
        let text = expression.text.trim();
        if let Some(ty) = self.types.get(text) {
            return Ok(ty.clone());
        }
        literal_type(text).ok_or_else(|| TypeCheckError::UnknownExpression {
            file_name: expression.file_name.clone(),
            text: text.to_string(),
        })
    }
}

/// In-memory program.
#[derive(Debug, Default)]
pub struct MemoryProgram {
    files: HashMap<String, SourceFile>,
}

impl MemoryProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: SourceFile) {
        self.files.insert(file.file_name.clone(), file);
    }

    pub fn file(&self, name: &str) -> &SourceFile {
        &self.files[name]
    }
}

impl Program for MemoryProgram {
    fn get_source_file(&self, file_name: &str) -> Option<&SourceFile> {
        self.files.get(file_name)
    }

    fn source_files(&self) -> Vec<&SourceFile> {
        self.files.values().collect()
    }
}

/// Discovery backed by a closure, counting its calls.
pub struct FnDiscovery<F> {
    discover: F,
    pub calls: Cell<usize>,
}

impl<F> FnDiscovery<F>
where
    F: Fn(&SourceFile) -> template_analyzer::Result<DiscoveryResult>,
{
    pub fn new(discover: F) -> Self {
        FnDiscovery {
            discover,
            calls: Cell::new(0),
        }
    }
}

impl<F> ComponentDiscovery for FnDiscovery<F>
where
    F: Fn(&SourceFile) -> template_analyzer::Result<DiscoveryResult>,
{
    fn discover(&self, file: &SourceFile, _program: &dyn Program) -> template_analyzer::Result<DiscoveryResult> {
        self.calls.set(self.calls.get() + 1);
        (self.discover)(file)
    }
}

/// `html\`<template>\`` as a source file named `test.ts`.
pub fn source_file(template: &str) -> SourceFile {
    SourceFile::new("test.ts", format!("html`{}`", template))
}

/// Parse a template wrapped in an `html` literal.
pub fn parse_html(template: &str) -> HtmlDocument {
    let file = source_file(template);
    let document = find_tagged_templates(&file, &AnalyzerConfig::default())
        .into_iter()
        .next()
        .expect("template literal");
    html_node::parse(document)
}

/// Source offset of the first occurrence of `needle` inside the template.
pub fn offset_of(template: &str, needle: &str) -> usize {
    TEMPLATE_START + template.find(needle).expect("needle in template")
}

pub fn first_node<'a>(document: &'a HtmlDocument, tag: &str) -> &'a HtmlNode {
    document
        .iter()
        .find(|node| node.tag_name == tag)
        .expect("node with tag")
}

pub fn attribute<'a>(node: &'a HtmlNode, written_name: &str) -> &'a HtmlNodeAttr {
    node.attributes
        .iter()
        .find(|attr| attr.written_name == written_name)
        .expect("attribute")
}

pub fn diagnose_with(template: &str, checker: &dyn TypeChecker, config: AnalyzerConfig) -> Vec<RuleDiagnostic> {
    let context = AnalyzerContext::new(config);
    TemplateAnalyzer::new(&context, checker).get_diagnostics_in_file(&source_file(template))
}

/// Diagnostics with every rule enabled at its strict severity.
pub fn diagnose(template: &str, checker: &dyn TypeChecker) -> Vec<RuleDiagnostic> {
    let config = AnalyzerConfig {
        strict: true,
        ..AnalyzerConfig::default()
    };
    diagnose_with(template, checker, config)
}

pub fn rule_ids(diagnostics: &[RuleDiagnostic]) -> Vec<&'static str> {
    diagnostics.iter().map(|d| d.rule_id).collect()
}

pub fn count_rule(diagnostics: &[RuleDiagnostic], rule_id: &str) -> usize {
    diagnostics.iter().filter(|d| d.rule_id == rule_id).count()
}
