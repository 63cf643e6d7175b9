#![deny(clippy::all)]

/**
 * Template Analyzer
 *
 * Static analysis of HTML and CSS written inside tagged template literals:
 * structural checks, unknown names and type-checked bindings.
 */

// Core modules
pub mod chars;
pub mod config;
pub mod error;
pub mod parse_util;

// Parser modules
pub mod document;
pub mod html_node;
pub mod markup;

// Analysis modules
pub mod analyzer;
pub mod context;
pub mod rules;
pub mod schema;

// Re-exports
pub use analyzer::{CodeFix, TemplateAnalyzer};
pub use config::{AnalyzerConfig, SecuritySystem, Severity};
pub use context::{
    AnalyzerContext, CancellationToken, ComponentDefinition, ComponentDiscovery, DiscoveryResult,
    UpdateOutcome,
};
pub use error::{AnalyzerError, Result};
pub use parse_util::Range;
pub use rules::{FixAction, RuleDiagnostic, RuleEngine};
