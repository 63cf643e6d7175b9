//! Diagnostics reported by rules.

use crate::config::Severity;
use crate::parse_util::Range;
use once_cell::unsync::Lazy;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// A text edit in source offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixAction {
    pub range: Range,
    pub new_text: String,
}

impl FixAction {
    pub fn replace(range: Range, new_text: impl Into<String>) -> Self {
        FixAction {
            range,
            new_text: new_text.into(),
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        FixAction::replace(Range::empty(offset), text)
    }

    pub fn remove(range: Range) -> Self {
        FixAction::replace(range, "")
    }
}

type FixThunk = Box<dyn FnOnce() -> Vec<FixAction>>;

/// Fix actions computed only when a host asks for them.
#[derive(Clone)]
pub struct LazyFix(Rc<Lazy<Vec<FixAction>, FixThunk>>);

impl LazyFix {
    pub fn new(thunk: impl FnOnce() -> Vec<FixAction> + 'static) -> Self {
        let thunk: FixThunk = Box::new(thunk);
        LazyFix(Rc::new(Lazy::new(thunk)))
    }

    pub fn actions(&self) -> &[FixAction] {
        Lazy::force(&*self.0).as_slice()
    }
}

impl fmt::Debug for LazyFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Lazy::get(&*self.0) {
            Some(actions) => f.debug_tuple("LazyFix").field(actions).finish(),
            None => write!(f, "LazyFix(<pending>)"),
        }
    }
}

/// What a rule hands to `RuleContext::report`.
#[derive(Debug, Clone)]
pub struct RuleReport {
    pub message: String,
    pub location: Range,
    pub fix_message: Option<String>,
    pub suggestion: Option<String>,
    pub fix: Option<LazyFix>,
}

impl RuleReport {
    pub fn new(message: impl Into<String>, location: Range) -> Self {
        RuleReport {
            message: message.into(),
            location,
            fix_message: None,
            suggestion: None,
            fix: None,
        }
    }

    pub fn fix_message(mut self, message: impl Into<String>) -> Self {
        self.fix_message = Some(message.into());
        self
    }

    pub fn suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn fix(mut self, thunk: impl FnOnce() -> Vec<FixAction> + 'static) -> Self {
        self.fix = Some(LazyFix::new(thunk));
        self
    }
}

#[derive(Debug, Clone)]
pub struct RuleDiagnostic {
    pub rule_id: &'static str,
    pub severity: Severity,
    pub message: String,
    /// Source-file offsets.
    pub location: Range,
    pub fix_message: Option<String>,
    pub suggestion: Option<String>,
    pub fix: Option<LazyFix>,
}

impl RuleDiagnostic {
    pub(crate) fn from_report(rule_id: &'static str, severity: Severity, report: RuleReport) -> Self {
        RuleDiagnostic {
            rule_id,
            severity,
            message: report.message,
            location: report.location,
            fix_message: report.fix_message,
            suggestion: report.suggestion,
            fix: report.fix,
        }
    }

    pub fn fix_actions(&self) -> &[FixAction] {
        match &self.fix {
            Some(fix) => fix.actions(),
            None => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for RuleDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {} ({})", self.severity, self.rule_id, self.message, self.location)
    }
}
