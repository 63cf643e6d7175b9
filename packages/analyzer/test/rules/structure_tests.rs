/**
 * Structure Rule Tests
 *
 * Tag names, closing tags, imports, slots and component declarations.
 */

#[path = "../util/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{
        count_rule, diagnose, diagnose_with, offset_of, rule_ids, FnDiscovery, MapTypeChecker, MemoryProgram,
    };
    use template_analyzer::config::AnalyzerConfig;
    use template_analyzer::context::{AnalyzerContext, CancellationToken, ComponentDefinition, DiscoveryResult};
    use template_analyzer::parse_util::Range;
    use template_analyzer::rules::RuleDiagnostic;
    use template_analyzer::TemplateAnalyzer;
    use ts::SourceFile;

    fn strict_with_tags(tags: &[&str]) -> AnalyzerConfig {
        AnalyzerConfig {
            strict: true,
            global_tags: tags.iter().map(|t| t.to_string()).collect(),
            ..AnalyzerConfig::default()
        }
    }

    mod unknown_tags {
        use super::*;

        #[test]
        fn should_suggest_nearest_registered_tag() {
            let template = "<unkown-element></unkown-element>";
            let diagnostics = diagnose_with(template, &MapTypeChecker::new(), strict_with_tags(&["unknown-element"]));
            assert_eq!(rule_ids(&diagnostics), vec!["no-unknown-tag-name"]);

            let diagnostic = &diagnostics[0];
            assert_eq!(diagnostic.message, "Unknown tag <unkown-element>.");
            let suggestion = diagnostic.suggestion.as_deref().unwrap();
            assert!(suggestion.starts_with("Did you mean <unknown-element>?"), "{}", suggestion);

            // Both the start and the end tag are renamed.
            let actions = diagnostic.fix_actions();
            assert_eq!(actions.len(), 2);
            assert!(actions.iter().all(|action| action.new_text == "unknown-element"));
            let end_name = offset_of(template, "/unkown-element") + 1;
            assert_eq!(actions[1].range, Range::new(end_name, end_name + "unkown-element".len()));
        }

        #[test]
        fn should_only_hint_configuration_without_close_name() {
            let diagnostics = diagnose("<zzz-qqq-xxx></zzz-qqq-xxx>", &MapTypeChecker::new());
            assert_eq!(rule_ids(&diagnostics), vec!["no-unknown-tag-name"]);
            let suggestion = diagnostics[0].suggestion.as_deref().unwrap();
            assert!(!suggestion.contains("Did you mean"));
            assert!(suggestion.contains("globalTags"));
            assert!(diagnostics[0].fix.is_none());
        }

        #[test]
        fn should_not_suggest_config_changes_when_disabled() {
            let config = AnalyzerConfig {
                strict: true,
                dont_suggest_config_changes: true,
                ..AnalyzerConfig::default()
            };
            let diagnostics = diagnose_with("<zzz-qqq-xxx></zzz-qqq-xxx>", &MapTypeChecker::new(), config);
            assert_eq!(diagnostics.len(), 1);
            assert!(diagnostics[0].suggestion.is_none());
        }

        #[test]
        fn should_accept_builtin_and_configured_tags() {
            let diagnostics = diagnose_with(
                "<div><app-shell></app-shell><svg><circle></circle></svg></div>",
                &MapTypeChecker::new(),
                strict_with_tags(&["app-shell"]),
            );
            assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));
        }
    }

    mod unclosed_tags {
        use super::*;

        #[test]
        fn should_report_missing_end_tag_with_fix() {
            let template = "<div><span>text</div>";
            let diagnostics = diagnose(template, &MapTypeChecker::new());
            assert_eq!(rule_ids(&diagnostics), vec!["no-unclosed-tag"]);
            assert_eq!(diagnostics[0].message, "This tag isn't closed: <span>");

            let after_text = offset_of(template, "text") + 4;
            let fix = &diagnostics[0].fix_actions()[0];
            assert_eq!(fix.range, Range::empty(after_text));
            assert_eq!(fix.new_text, "</span>");
        }

        #[test]
        fn should_report_paragraph_closed_by_parent() {
            let diagnostics = diagnose("<div><p>hello</div>", &MapTypeChecker::new());
            assert_eq!(rule_ids(&diagnostics), vec!["no-unclosed-tag"]);
            assert_eq!(diagnostics[0].message, "This tag isn't closed: <p>");
        }

        #[test]
        fn should_accept_void_and_self_closed_tags() {
            let diagnostics = diagnose_with(
                "<div><br><input><my-el /></div>",
                &MapTypeChecker::new(),
                strict_with_tags(&["my-el"]),
            );
            assert_eq!(count_rule(&diagnostics, "no-unclosed-tag"), 0, "{:?}", rule_ids(&diagnostics));
        }
    }

    mod slots {
        use super::*;

        fn card_config() -> AnalyzerConfig {
            AnalyzerConfig {
                strict: true,
                custom_html_data: vec![serde_json::json!({
                    "tags": [{ "name": "my-card", "slots": [{ "name": "header" }, { "name": "footer" }] }]
                })],
                ..AnalyzerConfig::default()
            }
        }

        #[test]
        fn should_report_unknown_slot_name() {
            let template = "<my-card><span slot=\"body\"></span></my-card>";
            let diagnostics = diagnose_with(template, &MapTypeChecker::new(), card_config());
            assert_eq!(rule_ids(&diagnostics), vec!["no-unknown-slot"]);
            assert!(diagnostics[0].message.contains("'header' | 'footer'"));
            let start = offset_of(template, "body");
            assert_eq!(diagnostics[0].location, Range::new(start, start + 4));
        }

        #[test]
        fn should_accept_declared_slot_names() {
            let template = "<my-card><span slot=\"header\"></span><b slot=\"footer\"></b></my-card>";
            let diagnostics = diagnose_with(template, &MapTypeChecker::new(), card_config());
            assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));
        }
    }

    mod components {
        use super::*;

        fn discovery_results(file: &SourceFile) -> template_analyzer::Result<DiscoveryResult> {
            let definitions = match file.file_name.as_str() {
                "button.ts" => vec![ComponentDefinition::new("my-button", "button.ts")],
                "bad.ts" => vec![ComponentDefinition::new("mybutton", "bad.ts").with_tag_name_range(Range::new(22, 30))],
                _ => Vec::new(),
            };
            Ok(DiscoveryResult {
                definitions,
                ..DiscoveryResult::default()
            })
        }

        fn analyze(program: &MemoryProgram, file_name: &str) -> Vec<RuleDiagnostic> {
            let mut context = AnalyzerContext::new(AnalyzerConfig {
                strict: true,
                ..AnalyzerConfig::default()
            });
            let discovery = FnDiscovery::new(discovery_results);
            let files: Vec<&SourceFile> = ["button.ts", "bad.ts", "page.ts", "importer.ts"]
                .iter()
                .map(|name| program.file(name))
                .collect();
            context.update_files(&files, program, &discovery, &CancellationToken::new());

            let checker = MapTypeChecker::new();
            TemplateAnalyzer::new(&context, &checker).get_diagnostics_in_file(program.file(file_name))
        }

        fn program() -> MemoryProgram {
            let mut program = MemoryProgram::new();
            program.add(SourceFile::new("button.ts", "class MyButton extends HTMLElement {}"));
            program.add(SourceFile::new("bad.ts", "customElements.define(\"mybutton\", Bad);"));
            program.add(SourceFile::new("page.ts", "html`<my-button></my-button>`"));
            program.add(
                SourceFile::new("importer.ts", "html`<my-button></my-button>`").with_imports(["button.ts"]),
            );
            program
        }

        #[test]
        fn should_report_missing_import() {
            let diagnostics = analyze(&program(), "page.ts");
            assert_eq!(rule_ids(&diagnostics), vec!["no-missing-import"]);
            assert!(diagnostics[0].suggestion.as_deref().unwrap().contains("button.ts"));
        }

        #[test]
        fn should_accept_imported_definition() {
            let diagnostics = analyze(&program(), "importer.ts");
            assert!(diagnostics.is_empty(), "{:?}", rule_ids(&diagnostics));
        }

        #[test]
        fn should_report_invalid_custom_element_name() {
            let diagnostics = analyze(&program(), "bad.ts");
            assert_eq!(rule_ids(&diagnostics), vec!["no-invalid-tag-name"]);
            assert_eq!(diagnostics[0].location, Range::new(22, 30));
            assert!(diagnostics[0].message.contains("hyphen"));
        }
    }
}
