/**
 * Member Name Rule Tests
 *
 * Legacy binding syntax in attribute names and values.
 */

#[path = "../util/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{count_rule, diagnose, diagnose_with, offset_of, MapTypeChecker};
    use template_analyzer::config::AnalyzerConfig;
    use template_analyzer::parse_util::Range;
    use template_analyzer::rules::RuleDiagnostic;
    use ts::SimpleType;

    const RULE: &str = "no-legacy-attribute";

    fn legacy(diagnostics: &[RuleDiagnostic]) -> &RuleDiagnostic {
        assert_eq!(count_rule(diagnostics, RULE), 1);
        diagnostics
            .iter()
            .find(|diagnostic| diagnostic.rule_id == RULE)
            .unwrap()
    }

    mod names {
        use super::*;

        #[test]
        fn should_rename_trailing_question_mark_to_boolean_modifier() {
            let template = "<input disabled?=\"${x}\" />";
            let checker = MapTypeChecker::new().with("x", SimpleType::Boolean);
            let diagnostics = diagnose(template, &checker);
            let diagnostic = legacy(&diagnostics);

            let start = offset_of(template, "disabled?");
            let name = Range::new(start, start + "disabled?".len());
            assert_eq!(diagnostic.location, name);
            let fix = &diagnostic.fix_actions()[0];
            assert_eq!(fix.range, name);
            assert_eq!(fix.new_text, "?disabled");
        }

        #[test]
        fn should_drop_trailing_dollar() {
            let template = "<input value$=\"${x}\" />";
            let checker = MapTypeChecker::new().with("x", SimpleType::String);
            let diagnostics = diagnose(template, &checker);
            let fix = &legacy(&diagnostics).fix_actions()[0];
            assert_eq!(fix.new_text, "value");
            assert_eq!(fix.range.start, offset_of(template, "value$"));
        }

        #[test]
        fn should_turn_on_prefix_into_event_binding() {
            let template = "<button on-click=${handler}></button>";
            let diagnostics = diagnose(template, &MapTypeChecker::new());
            assert_eq!(legacy(&diagnostics).fix_actions()[0].new_text, "@click");
        }

        #[test]
        fn should_leave_modern_names_alone() {
            let checker = MapTypeChecker::new().with("x", SimpleType::Boolean);
            let diagnostics = diagnose("<input ?disabled=${x} />", &checker);
            assert_eq!(count_rule(&diagnostics, RULE), 0);
        }
    }

    mod values {
        use super::*;

        #[test]
        fn should_report_mustache_expression() {
            let template = "<div title=\"{{name}}\"></div>";
            let diagnostics = diagnose(template, &MapTypeChecker::new());
            let start = offset_of(template, "{{name}}");
            assert_eq!(legacy(&diagnostics).location, Range::new(start, start + "{{name}}".len()));
        }

        #[test]
        fn should_report_double_bracket_expression() {
            let template = "<div title=\"a [[b]]\"></div>";
            let diagnostics = diagnose(template, &MapTypeChecker::new());
            let start = offset_of(template, "[[b]]");
            assert_eq!(legacy(&diagnostics).location, Range::new(start, start + 5));
        }

        #[test]
        fn should_be_off_outside_strict_mode() {
            let diagnostics = diagnose_with(
                "<div title=\"{{name}}\"></div>",
                &MapTypeChecker::new(),
                AnalyzerConfig::default(),
            );
            assert_eq!(count_rule(&diagnostics, RULE), 0);
        }
    }
}
