//! Rule dispatch.

use super::{default_rules, RuleContext, RuleDiagnostic, RuleHooks, RuleModule};
use crate::config::{AnalyzerConfig, Severity};
use crate::context::discovery::ComponentDefinition;
use crate::html_node::HtmlDocument;
use crate::schema::HtmlStore;
use std::collections::HashSet;
use ts::TypeChecker;

/// Everything a walk needs besides the document itself.
#[derive(Clone, Copy)]
pub struct RuleRequest<'a> {
    pub file_name: &'a str,
    pub store: &'a HtmlStore,
    pub checker: &'a dyn TypeChecker,
    pub config: &'a AnalyzerConfig,
    pub imported_files: Option<&'a HashSet<String>>,
}

pub struct RuleEngine {
    rules: Vec<Box<dyn RuleModule>>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        RuleEngine::new(default_rules())
    }
}

/// Outcome of one hook call, as seen by the walk.
enum Flow {
    Continue,
    Stop,
}

impl RuleEngine {
    pub fn new(mut rules: Vec<Box<dyn RuleModule>>) -> Self {
        // Stable: rules with equal priority keep their listed order.
        rules.sort_by_key(|rule| rule.meta().priority);
        RuleEngine { rules }
    }

    pub fn rule_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.meta().id)
    }

    /// Enabled rules listening to `hook`, with their effective severity.
    fn enabled(&self, config: &AnalyzerConfig, hook: RuleHooks) -> Vec<(&dyn RuleModule, Severity)> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let meta = rule.meta();
                if !meta.hooks.contains(hook) {
                    return None;
                }
                let severity = config.rule_severity(meta.id, meta.defaults);
                (!severity.is_off()).then_some((rule.as_ref(), severity))
            })
            .collect()
    }

    /// Walk every node, attribute and assignment of the document once.
    pub fn run_all(&self, document: &HtmlDocument, request: &RuleRequest<'_>) -> Vec<RuleDiagnostic> {
        let node_rules = self.enabled(request.config, RuleHooks::NODE);
        let attribute_rules = self.enabled(request.config, RuleHooks::ATTRIBUTE);
        let assignment_rules = self.enabled(request.config, RuleHooks::ASSIGNMENT);

        let mut ctx = RuleContext::new(request, Some(document));

        'walk: for node in document.iter() {
            for (rule, severity) in &node_rules {
                if document.is_ignored(node.id, rule.meta().id) {
                    continue;
                }
                let flow = dispatch(&mut ctx, *rule, *severity, request.config, |rule, ctx| {
                    rule.visit_node(node, ctx)
                });
                if let Flow::Stop = flow {
                    break 'walk;
                }
            }

            for attr in &node.attributes {
                for (rule, severity) in &attribute_rules {
                    if document.is_ignored(node.id, rule.meta().id) {
                        continue;
                    }
                    let flow = dispatch(&mut ctx, *rule, *severity, request.config, |rule, ctx| {
                        rule.visit_attribute(attr, ctx)
                    });
                    if let Flow::Stop = flow {
                        break 'walk;
                    }
                }
                for (rule, severity) in &assignment_rules {
                    if document.is_ignored(node.id, rule.meta().id) {
                        continue;
                    }
                    let flow = dispatch(&mut ctx, *rule, *severity, request.config, |rule, ctx| {
                        rule.visit_assignment(attr, &attr.assignment, ctx)
                    });
                    if let Flow::Stop = flow {
                        break 'walk;
                    }
                }
            }
        }

        ctx.take_reports()
    }

    /// Dispatch member hooks over the components declared in a file.
    pub fn run_on_components(
        &self,
        definitions: &[ComponentDefinition],
        request: &RuleRequest<'_>,
    ) -> Vec<RuleDiagnostic> {
        let member_rules = self.enabled(request.config, RuleHooks::MEMBER);
        let mut ctx = RuleContext::new(request, None);

        'walk: for definition in definitions {
            for (rule, severity) in &member_rules {
                let flow = dispatch(&mut ctx, *rule, *severity, request.config, |rule, ctx| {
                    rule.visit_component(definition, ctx)
                });
                if let Flow::Stop = flow {
                    break 'walk;
                }
            }
            for member in definition.declaration.all_members() {
                for (rule, severity) in &member_rules {
                    let flow = dispatch(&mut ctx, *rule, *severity, request.config, |rule, ctx| {
                        rule.visit_member(definition, member, ctx)
                    });
                    if let Flow::Stop = flow {
                        break 'walk;
                    }
                }
            }
        }

        ctx.take_reports()
    }
}

fn dispatch<'a>(
    ctx: &mut RuleContext<'a>,
    rule: &dyn RuleModule,
    severity: Severity,
    config: &AnalyzerConfig,
    hook: impl FnOnce(&dyn RuleModule, &mut RuleContext<'a>) -> anyhow::Result<()>,
) -> Flow {
    let id = rule.meta().id;
    ctx.enter_rule(id, severity);
    let before = ctx.report_count();

    if let Err(err) = hook(rule, ctx) {
        tracing::warn!(rule = id, file = ctx.file_name, error = %err, "rule failed");
        // A failed hook contributes nothing.
        ctx.truncate_reports(before);
    }

    if ctx.is_break_requested() {
        return Flow::Stop;
    }
    if config.fail_fast && ctx.reports_since(before).iter().any(RuleDiagnostic::is_error) {
        tracing::debug!(rule = id, "stopping walk after first error");
        return Flow::Stop;
    }
    Flow::Continue
}
