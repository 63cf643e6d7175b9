//! Analyzer configuration.
//!
//! The host glue hands the configuration in as a `serde_json::Value`; keys are
//! camelCase. Every key is optional.

use crate::error::{AnalyzerError, Result};
use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Off,
    Warning,
    Error,
}

impl Severity {
    pub fn parse(value: &str) -> Option<Severity> {
        match value.trim().to_ascii_lowercase().as_str() {
            "off" | "false" | "0" => Some(Severity::Off),
            "warn" | "warning" | "on" | "true" | "1" => Some(Severity::Warning),
            "error" | "2" => Some(Severity::Error),
            _ => None,
        }
    }

    pub fn is_off(&self) -> bool {
        matches!(self, Severity::Off)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Off => write!(f, "off"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Accepts `"off" | "warn" | "warning" | "error"`, `0 | 1 | 2` and `true | false`.
impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
            Flag(bool),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Severity::parse(&text)
                .ok_or_else(|| de::Error::custom(AnalyzerError::InvalidSeverity(text))),
            Raw::Number(0) => Ok(Severity::Off),
            Raw::Number(1) => Ok(Severity::Warning),
            Raw::Number(2) => Ok(Severity::Error),
            Raw::Number(other) => Err(de::Error::custom(AnalyzerError::InvalidSeverity(
                other.to_string(),
            ))),
            Raw::Flag(true) => Ok(Severity::Warning),
            Raw::Flag(false) => Ok(Severity::Off),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SecuritySystem {
    #[default]
    #[serde(rename = "off")]
    Off,
    #[serde(rename = "ClosureSafeTypes", alias = "on")]
    ClosureSafeTypes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerConfig {
    /// Switches every rule to its strict default severity.
    pub strict: bool,
    pub rules: IndexMap<String, Severity>,
    pub html_template_tags: Vec<String>,
    pub css_template_tags: Vec<String>,
    pub global_tags: Vec<String>,
    pub global_attributes: Vec<String>,
    pub global_events: Vec<String>,
    /// Inline custom element data in the editor custom-data format.
    #[serde(deserialize_with = "one_or_many")]
    pub custom_html_data: Vec<serde_json::Value>,
    pub dont_suggest_config_changes: bool,
    pub security_system: SecuritySystem,
    /// How many import hops a definition may be away from a file and still
    /// count as imported.
    pub max_project_import_depth: Option<usize>,
    /// Wall-clock budget for one discovery pass.
    pub discovery_timeout_ms: Option<u64>,
    /// Stop the walk after the first error-severity diagnostic.
    pub fail_fast: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            strict: false,
            rules: IndexMap::new(),
            html_template_tags: vec!["html".to_string(), "svg".to_string()],
            css_template_tags: vec!["css".to_string()],
            global_tags: Vec::new(),
            global_attributes: Vec::new(),
            global_events: Vec::new(),
            custom_html_data: Vec::new(),
            dont_suggest_config_changes: false,
            security_system: SecuritySystem::Off,
            max_project_import_depth: None,
            discovery_timeout_ms: None,
            fail_fast: false,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let config: AnalyzerConfig = serde_json::from_value(value)?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: AnalyzerConfig = serde_json::from_str(text)?;
        Ok(config)
    }

    /// Effective severity of a rule: an explicit entry in `rules` wins, then
    /// the strict or normal default of the rule.
    pub fn rule_severity(&self, rule_id: &str, defaults: RuleDefaults) -> Severity {
        if let Some(severity) = self.rules.get(rule_id) {
            return *severity;
        }
        if self.strict {
            defaults.strict
        } else {
            defaults.normal
        }
    }

    pub fn is_html_tag(&self, tag: &str) -> bool {
        self.html_template_tags.iter().any(|t| t == tag)
    }

    pub fn is_css_tag(&self, tag: &str) -> bool {
        self.css_template_tags.iter().any(|t| t == tag)
    }
}

/// Default severities of a rule in normal and strict mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDefaults {
    pub normal: Severity,
    pub strict: Severity,
}

impl RuleDefaults {
    pub const fn new(normal: Severity, strict: Severity) -> Self {
        RuleDefaults { normal, strict }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::Array(values) => Ok(values),
        other => Ok(vec![other]),
    }
}
