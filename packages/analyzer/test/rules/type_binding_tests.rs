/**
 * Type Binding Tests
 *
 * Attribute, property, boolean and event bindings checked against the
 * built-in schema with a map-backed type oracle.
 */

#[path = "../util/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{count_rule, diagnose, diagnose_with, offset_of, rule_ids, source_file, MapTypeChecker};
    use template_analyzer::config::{AnalyzerConfig, Severity};
    use template_analyzer::context::AnalyzerContext;
    use template_analyzer::parse_util::Range;
    use template_analyzer::TemplateAnalyzer;
    use ts::{SimpleType, SimpleTypeParameter};

    fn handler() -> SimpleType {
        SimpleType::function(
            vec![SimpleTypeParameter::new("event", SimpleType::interface("Event", vec![]))],
            SimpleType::Void,
        )
    }

    mod attributes {
        use super::*;

        #[test]
        fn should_reject_non_numeric_string_for_number_attribute() {
            let template = "<input maxlength=\"foo\" />";
            let diagnostics = diagnose(template, &MapTypeChecker::new());
            assert_eq!(rule_ids(&diagnostics), vec!["no-incompatible-type-binding"]);
            assert_eq!(diagnostics[0].message, "Type '\"foo\"' is not assignable to 'number'.");
            let start = offset_of(template, "foo");
            assert_eq!(diagnostics[0].location, Range::new(start, start + 3));
        }

        #[test]
        fn should_accept_numeric_string_for_number_attribute() {
            let diagnostics = diagnose("<input maxlength=\"123\" />", &MapTypeChecker::new());
            assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));
        }

        #[test]
        fn should_reject_bare_attribute_for_number_attribute() {
            let template = "<input maxlength />";
            let diagnostics = diagnose(template, &MapTypeChecker::new());
            assert_eq!(rule_ids(&diagnostics), vec!["no-incompatible-type-binding"]);
            assert!(diagnostics[0].message.ends_with("is not assignable to 'number'."));
            let start = offset_of(template, "maxlength");
            assert_eq!(diagnostics[0].location, Range::new(start, start + "maxlength".len()));
        }

        #[test]
        fn should_accept_bare_boolean_and_string_attributes() {
            let diagnostics = diagnose("<input disabled required /><a download></a>", &MapTypeChecker::new());
            assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));
        }

        #[test]
        fn should_accept_number_expression_for_string_attribute() {
            let checker = MapTypeChecker::new().with("count", SimpleType::Number);
            let diagnostics = diagnose("<input value=${count} />", &checker);
            assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));
        }

        #[test]
        fn should_report_boolean_bound_as_attribute() {
            let template = "<input value=${flag} />";
            let checker = MapTypeChecker::new().with("flag", SimpleType::Boolean);
            let diagnostics = diagnose(template, &checker);
            assert_eq!(rule_ids(&diagnostics), vec!["no-boolean-in-attribute-binding"]);
            let at = offset_of(template, "value");
            assert_eq!(diagnostics[0].fix_actions()[0].range, Range::empty(at));
            assert_eq!(diagnostics[0].fix_actions()[0].new_text, "?");
        }

        #[test]
        fn should_report_complex_value_once() {
            let template = "<input value=${items} />";
            let checker = MapTypeChecker::new().with("items", SimpleType::Array(Box::new(SimpleType::String)));
            let diagnostics = diagnose(template, &checker);
            assert_eq!(rule_ids(&diagnostics), vec!["no-complex-attribute-binding"]);
            // `value` is also a property, so the fix turns this into a property binding.
            assert_eq!(diagnostics[0].fix_actions()[0].new_text, ".");
        }

        #[test]
        fn should_report_nullable_value_with_if_defined_fix() {
            let template = "<input value=${maybe} />";
            let checker = MapTypeChecker::new().with("maybe", SimpleType::union([SimpleType::String, SimpleType::Undefined]));
            let diagnostics = diagnose(template, &checker);
            assert_eq!(rule_ids(&diagnostics), vec!["no-nullable-attribute-binding"]);
            assert!(diagnostics[0].message.contains("'undefined'"));

            let start = offset_of(template, "maybe");
            let fix = &diagnostics[0].fix_actions()[0];
            assert_eq!(fix.range, Range::new(start, start + 5));
            assert_eq!(fix.new_text, "ifDefined(maybe)");
        }

        #[test]
        fn should_check_enumerated_values_from_custom_data() {
            let config = AnalyzerConfig {
                strict: true,
                custom_html_data: vec![serde_json::json!({
                    "version": 1,
                    "globalAttributes": [
                        { "name": "layout", "values": [{ "name": "row" }, { "name": "column" }] }
                    ]
                })],
                ..AnalyzerConfig::default()
            };
            let diagnostics = diagnose_with("<div layout=\"grid\"></div>", &MapTypeChecker::new(), config.clone());
            assert_eq!(count_rule(&diagnostics, "no-incompatible-type-binding"), 1);

            let diagnostics = diagnose_with("<div layout=\"row\"></div>", &MapTypeChecker::new(), config);
            assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));
        }
    }

    mod properties {
        use super::*;

        #[test]
        fn should_not_coerce_strings_for_properties() {
            let diagnostics = diagnose("<input .required=\"${\"foo\"}\" />", &MapTypeChecker::new());
            assert_eq!(rule_ids(&diagnostics), vec!["no-incompatible-type-binding"]);
        }

        #[test]
        fn should_accept_matching_property_type() {
            let checker = MapTypeChecker::new().with("flag", SimpleType::Boolean);
            let diagnostics = diagnose("<input .required=${flag} />", &checker);
            assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));
        }

        #[test]
        fn should_report_property_binding_without_expression() {
            let template = "<input .value=\"text\" />";
            let diagnostics = diagnose(template, &MapTypeChecker::new());
            assert_eq!(rule_ids(&diagnostics), vec!["no-expressionless-property-binding"]);

            let start = offset_of(template, "text");
            let fix = &diagnostics[0].fix_actions()[0];
            assert_eq!(fix.range, Range::new(start, start + 4));
            assert_eq!(fix.new_text, "${\"text\"}");
        }
    }

    mod boolean_attributes {
        use super::*;

        #[test]
        fn should_report_non_boolean_value_exactly_once() {
            for ty in [SimpleType::String, SimpleType::Number, SimpleType::string_literal("yes")] {
                let checker = MapTypeChecker::new().with("value", ty);
                let diagnostics = diagnose("<input ?required=${value} />", &checker);
                assert_eq!(rule_ids(&diagnostics), vec!["no-invalid-boolean-binding"]);
            }
        }

        #[test]
        fn should_skip_any_and_nullable_booleans() {
            for ty in [
                SimpleType::Any,
                SimpleType::Boolean,
                SimpleType::union([SimpleType::Boolean, SimpleType::Null]),
            ] {
                let checker = MapTypeChecker::new().with("value", ty);
                let diagnostics = diagnose("<input ?required=${value} />", &checker);
                assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));
            }
        }

        #[test]
        fn should_report_boolean_modifier_on_non_boolean_attribute() {
            let template = "<input ?maxlength=${flag} />";
            let checker = MapTypeChecker::new().with("flag", SimpleType::Boolean);
            let diagnostics = diagnose(template, &checker);
            assert_eq!(rule_ids(&diagnostics), vec!["no-invalid-boolean-binding"]);

            let modifier = offset_of(template, "?");
            let fix = &diagnostics[0].fix_actions()[0];
            assert_eq!(fix.range, Range::new(modifier, modifier + 1));
            assert_eq!(fix.new_text, "");
        }
    }

    mod events {
        use super::*;

        #[test]
        fn should_accept_functions_and_listener_objects() {
            let listener = SimpleType::object_literal(vec![ts::SimpleTypeMember::new("handleEvent", handler())]);
            let checker = MapTypeChecker::new()
                .with("onClick", handler())
                .with("listener", listener);
            let diagnostics = diagnose(
                "<button @click=${onClick}></button><button @click=${listener}></button>",
                &checker,
            );
            assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));
        }

        #[test]
        fn should_report_non_callable_listener() {
            let checker = MapTypeChecker::new().with("count", SimpleType::Number);
            let diagnostics = diagnose("<button @click=${count}></button>", &checker);
            assert_eq!(rule_ids(&diagnostics), vec!["no-noncallable-event-binding"]);
            assert!(diagnostics[0].message.contains("'number'"));
        }
    }

    mod mixed_and_directives {
        use super::*;

        #[test]
        fn should_report_stray_quote_after_expression() {
            let template = "<input value=${v}\" />";
            let checker = MapTypeChecker::new().with("v", SimpleType::String);
            let diagnostics = diagnose(template, &checker);
            assert_eq!(rule_ids(&diagnostics), vec!["no-unintended-mixed-binding"]);

            let start = offset_of(template, "${v}");
            let fix = &diagnostics[0].fix_actions()[0];
            assert_eq!(fix.range, Range::new(start, start + "${v}\"".len()));
            assert_eq!(fix.new_text, "${v}");
        }

        #[test]
        fn should_accept_text_around_expression() {
            let checker = MapTypeChecker::new().with("name", SimpleType::String);
            let diagnostics = diagnose("<input value=\"Hello ${name}!\" />", &checker);
            assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));
        }

        #[test]
        fn should_only_allow_directives_in_element_position() {
            let directive = SimpleType::GenericInstance {
                name: "DirectiveResult".to_string(),
                type_arguments: vec![],
                target: Box::new(SimpleType::object_literal(vec![])),
            };
            let checker = MapTypeChecker::new()
                .with("ref(el)", directive)
                .with("count", SimpleType::Number);

            let diagnostics = diagnose("<div ${ref(el)}></div>", &checker);
            assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));

            let diagnostics = diagnose("<div ${count}></div>", &checker);
            assert_eq!(rule_ids(&diagnostics), vec!["no-invalid-directive-binding"]);
        }

        #[test]
        fn should_skip_type_checks_for_directive_values() {
            let directive = SimpleType::alias(
                "ClassMap",
                SimpleType::function(
                    vec![SimpleTypeParameter::new("part", SimpleType::interface("AttributePart", vec![]))],
                    SimpleType::Void,
                ),
            );
            let checker = MapTypeChecker::new().with("classMap(c)", directive);
            let diagnostics = diagnose("<input maxlength=${classMap(c)} />", &checker);
            assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));
        }
    }

    mod configuration {
        use super::*;

        #[test]
        fn should_honor_rule_overrides() {
            let mut config = AnalyzerConfig {
                strict: true,
                ..AnalyzerConfig::default()
            };
            config
                .rules
                .insert("no-incompatible-type-binding".to_string(), Severity::Off);
            let diagnostics = diagnose_with("<input maxlength=\"foo\" />", &MapTypeChecker::new(), config);
            assert!(diagnostics.is_empty());
        }

        #[test]
        fn should_suppress_rules_named_in_ignore_comment() {
            let template = "<!-- template-analyzer-ignore no-incompatible-type-binding --><input maxlength=\"foo\" />";
            let diagnostics = diagnose(template, &MapTypeChecker::new());
            assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));
        }

        #[test]
        fn should_log_and_skip_unknown_expressions() {
            // No type for `mystery`: the rules needing it produce nothing.
            let diagnostics = diagnose("<input value=${mystery} />", &MapTypeChecker::new());
            assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));
        }

        #[test]
        fn should_return_fixes_in_range() {
            let template = "<input value=${maybe} /><input .value=\"x\" />";
            let checker = MapTypeChecker::new().with("maybe", SimpleType::union([SimpleType::String, SimpleType::Null]));
            let context = AnalyzerContext::new(AnalyzerConfig::default());
            let analyzer = TemplateAnalyzer::new(&context, &checker);
            let file = source_file(template);

            let at = offset_of(template, "maybe");
            let fixes = analyzer.get_code_fixes_in_range(&file, Range::empty(at));
            assert_eq!(fixes.len(), 1);
            assert_eq!(fixes[0].rule_id, "no-nullable-attribute-binding");
            assert_eq!(fixes[0].actions[0].new_text, "ifDefined(maybe)");

            let all = analyzer.get_diagnostics_in_file(&file);
            assert_eq!(all.len(), 2);
            assert!(all[0].location.start < all[1].location.start);
        }
    }
}
