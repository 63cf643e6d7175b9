/**
 * Rule Engine Tests
 *
 * Dispatch order, early termination, severity gating and hook failures,
 * using small rules defined here.
 */

#[path = "../util/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{parse_html, source_file, MapTypeChecker};
    use template_analyzer::config::{AnalyzerConfig, Severity};
    use template_analyzer::context::AnalyzerContext;
    use template_analyzer::html_node::HtmlNode;
    use template_analyzer::rules::{
        RuleContext, RuleDiagnostic, RuleEngine, RuleHooks, RuleMeta, RuleModule, RuleReport, RuleRequest,
    };
    use template_analyzer::TemplateAnalyzer;

    /// Reports every element it visits, and stops the walk after `stop_at`.
    struct ReportTags {
        id: &'static str,
        priority: u8,
        stop_at: Option<&'static str>,
    }

    impl ReportTags {
        fn boxed(id: &'static str, priority: u8) -> Box<dyn RuleModule> {
            Box::new(ReportTags {
                id,
                priority,
                stop_at: None,
            })
        }
    }

    impl RuleModule for ReportTags {
        fn meta(&self) -> RuleMeta {
            RuleMeta::new(self.id, Severity::Warning, Severity::Error, RuleHooks::NODE).with_priority(self.priority)
        }

        fn visit_node(&self, node: &HtmlNode, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
            ctx.report(RuleReport::new(format!("{}:{}", self.id, node.tag_name), node.location.name));
            if self.stop_at == Some(node.tag_name.as_str()) {
                ctx.break_walk();
            }
            Ok(())
        }
    }

    struct Failing;

    impl RuleModule for Failing {
        fn meta(&self) -> RuleMeta {
            RuleMeta::new("failing", Severity::Error, Severity::Error, RuleHooks::NODE).with_priority(0)
        }

        fn visit_node(&self, node: &HtmlNode, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
            ctx.report(RuleReport::new(format!("failing:{}", node.tag_name), node.location.name));
            anyhow::bail!("type oracle unavailable")
        }
    }

    const TEMPLATE: &str = "<a-el></a-el><b-el></b-el><c-el></c-el>";

    fn run(engine: &RuleEngine, config: AnalyzerConfig) -> Vec<String> {
        let context = AnalyzerContext::new(config);
        let checker = MapTypeChecker::new();
        let document = parse_html(TEMPLATE);
        let request = RuleRequest {
            file_name: "test.ts",
            store: context.store(),
            checker: &checker,
            config: context.config(),
            imported_files: None,
        };
        engine
            .run_all(&document, &request)
            .into_iter()
            .map(|diagnostic| diagnostic.message)
            .collect()
    }

    mod dispatch {
        use super::*;

        #[test]
        fn should_order_rules_by_priority() {
            let engine = RuleEngine::new(vec![ReportTags::boxed("late", 200), ReportTags::boxed("early", 10)]);
            assert_eq!(engine.rule_ids().collect::<Vec<_>>(), vec!["early", "late"]);

            let messages = run(&engine, AnalyzerConfig::default());
            assert_eq!(&messages[..2], &["early:a-el", "late:a-el"]);
            assert_eq!(messages.len(), 6);
        }

        #[test]
        fn should_skip_rules_configured_off() {
            let engine = RuleEngine::new(vec![ReportTags::boxed("quiet", 100)]);
            let mut config = AnalyzerConfig::default();
            config.rules.insert("quiet".to_string(), Severity::Off);
            assert!(run(&engine, config).is_empty());
        }

        #[test]
        fn should_keep_walking_when_a_hook_fails() {
            let engine = RuleEngine::new(vec![Box::new(Failing), ReportTags::boxed("tags", 100)]);
            let messages = run(&engine, AnalyzerConfig::default());
            assert_eq!(messages, vec!["tags:a-el", "tags:b-el", "tags:c-el"]);
        }

        #[test]
        fn should_drop_reports_from_a_failed_hook() {
            let engine = RuleEngine::new(vec![Box::new(Failing), ReportTags::boxed("tags", 100)]);
            let config = AnalyzerConfig {
                fail_fast: true,
                ..AnalyzerConfig::default()
            };
            let messages = run(&engine, config);
            assert!(messages.iter().all(|message| !message.starts_with("failing:")));
            assert_eq!(messages.len(), 3);
        }
    }

    mod termination {
        use super::*;

        #[test]
        fn should_stop_when_rule_breaks_walk() {
            let engine = RuleEngine::new(vec![Box::new(ReportTags {
                id: "tags",
                priority: 100,
                stop_at: Some("b-el"),
            })]);
            assert_eq!(run(&engine, AnalyzerConfig::default()), vec!["tags:a-el", "tags:b-el"]);
        }

        #[test]
        fn should_stop_after_first_error_in_fail_fast_mode() {
            let engine = RuleEngine::new(vec![ReportTags::boxed("tags", 100)]);
            let config = AnalyzerConfig {
                strict: true,
                fail_fast: true,
                ..AnalyzerConfig::default()
            };
            assert_eq!(run(&engine, config), vec!["tags:a-el"]);
        }

        #[test]
        fn should_ignore_fail_fast_for_warnings() {
            let engine = RuleEngine::new(vec![ReportTags::boxed("tags", 100)]);
            let config = AnalyzerConfig {
                fail_fast: true,
                ..AnalyzerConfig::default()
            };
            assert_eq!(run(&engine, config).len(), 3);
        }
    }

    mod facade {
        use super::*;

        #[test]
        fn should_analyze_with_custom_engine() {
            let context = AnalyzerContext::new(AnalyzerConfig::default());
            let checker = MapTypeChecker::new();
            let engine = RuleEngine::new(vec![ReportTags::boxed("tags", 100)]);
            let diagnostics: Vec<RuleDiagnostic> = TemplateAnalyzer::new(&context, &checker)
                .with_engine(engine)
                .get_diagnostics_in_file(&source_file("<unknown-el></unknown-el>"));

            assert_eq!(diagnostics.len(), 1);
            assert_eq!(diagnostics[0].rule_id, "tags");
            assert_eq!(diagnostics[0].severity, Severity::Warning);
        }

        #[test]
        fn should_keep_template_text_for_plain_markup() {
            let document = parse_html(TEMPLATE);
            assert_eq!(document.virtual_document().text(), TEMPLATE);
            assert_eq!(document.roots().len(), 3);
        }
    }
}
