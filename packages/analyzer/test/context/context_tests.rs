/**
 * Incremental Context Tests
 *
 * Discovery bookkeeping across updates: content hashing, dependents,
 * cancellation and file removal.
 */

#[path = "../util/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{FnDiscovery, MemoryProgram};
    use template_analyzer::config::AnalyzerConfig;
    use template_analyzer::context::{
        AnalyzerContext, CancellationToken, ComponentDefinition, DiscoveryResult, UpdateOutcome,
    };
    use template_analyzer::error::AnalyzerError;
    use template_analyzer::schema::{
        HtmlDataCollection, HtmlDataSource, HtmlMember, HtmlMemberKind, HtmlTag, SourceKind,
    };
    use ts::{SimpleType, SourceFile};

    /// Declares `<x-{stem}>` for every `{stem}.ts`. A file whose text contains
    /// `extends` depends on `base.ts`; one containing `broken` fails.
    fn discover(file: &SourceFile) -> template_analyzer::Result<DiscoveryResult> {
        if file.text.contains("broken") {
            return Err(AnalyzerError::Discovery {
                file_name: file.file_name.clone(),
                message: "unsupported syntax".to_string(),
            });
        }
        let stem = file.file_name.trim_end_matches(".ts");
        let member = HtmlMember::new(
            HtmlMemberKind::Property,
            "label",
            HtmlDataSource::new(SourceKind::Discovered, file.file_name.clone()),
        )
        .with_type(SimpleType::String);
        let definition = ComponentDefinition::new(format!("x-{}", stem), file.file_name.clone()).with_member(member, None);
        let dependencies = if file.text.contains("extends") {
            vec!["base.ts".to_string()]
        } else {
            Vec::new()
        };
        Ok(DiscoveryResult {
            definitions: vec![definition],
            global: Vec::new(),
            dependencies,
        })
    }

    fn program(files: &[(&str, &str)]) -> MemoryProgram {
        let mut program = MemoryProgram::new();
        for (name, text) in files {
            program.add(SourceFile::new(*name, *text));
        }
        program
    }

    fn update(
        context: &mut AnalyzerContext,
        program: &MemoryProgram,
        names: &[&str],
        discovery: &FnDiscovery<fn(&SourceFile) -> template_analyzer::Result<DiscoveryResult>>,
        token: &CancellationToken,
    ) -> UpdateOutcome {
        let files: Vec<&SourceFile> = names.iter().map(|name| program.file(name)).collect();
        context.update_files(&files, program, discovery, token)
    }

    fn discovery() -> FnDiscovery<fn(&SourceFile) -> template_analyzer::Result<DiscoveryResult>> {
        FnDiscovery::new(discover as fn(&SourceFile) -> template_analyzer::Result<DiscoveryResult>)
    }

    mod updates {
        use super::*;

        #[test]
        fn should_absorb_discovered_components() {
            let program = program(&[("a.ts", "class A {}"), ("b.ts", "class B {}")]);
            let discovery = discovery();
            let mut context = AnalyzerContext::new(AnalyzerConfig::default());

            let outcome = update(&mut context, &program, &["a.ts", "b.ts"], &discovery, &CancellationToken::new());
            assert_eq!(
                outcome,
                UpdateOutcome::Completed {
                    updated: vec!["a.ts".to_string(), "b.ts".to_string()]
                }
            );
            assert!(context.store().has_tag("x-a"));
            assert_eq!(
                context.store().get_property("x-b", "label").unwrap().member_type(),
                Some(&SimpleType::String)
            );
            assert_eq!(context.definitions_in("a.ts").len(), 1);
            assert_eq!(context.definitions().count(), 2);
        }

        #[test]
        fn should_skip_unchanged_files() {
            let program = program(&[("a.ts", "class A {}")]);
            let discovery = discovery();
            let mut context = AnalyzerContext::new(AnalyzerConfig::default());
            let token = CancellationToken::new();

            update(&mut context, &program, &["a.ts"], &discovery, &token);
            let outcome = update(&mut context, &program, &["a.ts"], &discovery, &token);
            assert_eq!(outcome, UpdateOutcome::Completed { updated: vec![] });
            assert_eq!(discovery.calls.get(), 1);
        }

        #[test]
        fn should_rediscover_changed_file() {
            let discovery = discovery();
            let mut context = AnalyzerContext::new(AnalyzerConfig::default());
            let token = CancellationToken::new();

            let first = program(&[("a.ts", "class A {}")]);
            update(&mut context, &first, &["a.ts"], &discovery, &token);
            let second = program(&[("a.ts", "class A { label = '' }")]);
            let outcome = update(&mut context, &second, &["a.ts"], &discovery, &token);

            assert_eq!(outcome, UpdateOutcome::Completed { updated: vec!["a.ts".to_string()] });
            assert_eq!(discovery.calls.get(), 2);
            assert_eq!(context.store().origins(SourceKind::Discovered), vec!["a.ts"]);
        }

        #[test]
        fn should_requeue_files_depending_on_changed_file() {
            let discovery = discovery();
            let mut context = AnalyzerContext::new(AnalyzerConfig::default());
            let token = CancellationToken::new();

            let first = program(&[("base.ts", "class Base {}"), ("child.ts", "class C extends Base {}")]);
            update(&mut context, &first, &["base.ts", "child.ts"], &discovery, &token);

            let second = program(&[("base.ts", "class Base { x = 1 }"), ("child.ts", "class C extends Base {}")]);
            let outcome = update(&mut context, &second, &["base.ts"], &discovery, &token);
            assert_eq!(
                outcome,
                UpdateOutcome::Completed {
                    updated: vec!["base.ts".to_string(), "child.ts".to_string()]
                }
            );
        }

        #[test]
        fn should_forget_components_when_discovery_fails() {
            let discovery = discovery();
            let mut context = AnalyzerContext::new(AnalyzerConfig::default());
            let token = CancellationToken::new();

            let first = program(&[("a.ts", "class A {}")]);
            update(&mut context, &first, &["a.ts"], &discovery, &token);
            assert!(context.store().has_tag("x-a"));

            let second = program(&[("a.ts", "class A { broken }")]);
            let outcome = update(&mut context, &second, &["a.ts"], &discovery, &token);
            assert!(!outcome.is_cancelled());
            assert!(!context.store().has_tag("x-a"));
            assert!(context.definitions_in("a.ts").is_empty());
        }
    }

    mod library {
        use super::*;

        #[test]
        fn should_layer_library_data_below_discovered() {
            let source = HtmlDataSource::new(SourceKind::Library, "elements.json");
            let mut tag = HtmlTag::new("x-a", source.clone());
            tag.add_member(
                HtmlMember::new(HtmlMemberKind::Property, "label", source)
                    .with_type(SimpleType::Number)
                    .with_description("Text shown on the element.")
                    .from_tag("x-a"),
            );
            let mut context = AnalyzerContext::new(AnalyzerConfig::default());
            context.absorb_library(
                "elements.json",
                HtmlDataCollection {
                    tags: vec![tag],
                    global: Vec::new(),
                },
            );
            assert!(context.store().has_origin(SourceKind::Library, "elements.json"));
            let label = context.store().get_property("x-a", "label").unwrap();
            assert_eq!(label.description.as_deref(), Some("Text shown on the element."));
            assert_eq!(label.member_type(), Some(&SimpleType::Number));

            let program = program(&[("a.ts", "class A {}")]);
            update(&mut context, &program, &["a.ts"], &discovery(), &CancellationToken::new());
            assert_eq!(
                context.store().get_property("x-a", "label").unwrap().member_type(),
                Some(&SimpleType::String)
            );
        }
    }

    mod cancellation {
        use super::*;

        #[test]
        fn should_defer_all_files_when_cancelled_up_front() {
            let program = program(&[("a.ts", "class A {}"), ("b.ts", "class B {}")]);
            let discovery = discovery();
            let mut context = AnalyzerContext::new(AnalyzerConfig::default());

            let token = CancellationToken::new();
            token.cancel();
            let outcome = update(&mut context, &program, &["a.ts", "b.ts"], &discovery, &token);
            assert_eq!(
                outcome,
                UpdateOutcome::Cancelled {
                    updated: vec![],
                    deferred: vec!["a.ts".to_string(), "b.ts".to_string()],
                }
            );
            assert_eq!(discovery.calls.get(), 0);
            assert_eq!(context.pending_files().collect::<Vec<_>>(), vec!["a.ts", "b.ts"]);
        }

        #[test]
        fn should_process_deferred_files_first_on_next_pass() {
            let program = program(&[("a.ts", "class A {}"), ("b.ts", "class B {}"), ("c.ts", "class C {}")]);
            let discovery = discovery();
            let mut context = AnalyzerContext::new(AnalyzerConfig::default());

            let cancelled = CancellationToken::new();
            cancelled.cancel();
            update(&mut context, &program, &["a.ts", "b.ts"], &discovery, &cancelled);

            let outcome = update(&mut context, &program, &["c.ts"], &discovery, &CancellationToken::new());
            assert_eq!(
                outcome,
                UpdateOutcome::Completed {
                    updated: vec!["a.ts".to_string(), "b.ts".to_string(), "c.ts".to_string()]
                }
            );
            assert_eq!(context.pending_files().count(), 0);
        }

        #[test]
        fn should_honor_configured_discovery_timeout() {
            let program = program(&[("a.ts", "class A {}")]);
            let discovery = discovery();
            let mut context = AnalyzerContext::new(AnalyzerConfig {
                discovery_timeout_ms: Some(0),
                ..AnalyzerConfig::default()
            });

            let outcome = update(&mut context, &program, &["a.ts"], &discovery, &CancellationToken::new());
            assert!(outcome.is_cancelled());
            assert!(!context.store().has_tag("x-a"));
        }
    }

    mod imports {
        use super::*;

        fn chained_program() -> MemoryProgram {
            let mut program = MemoryProgram::new();
            program.add(SourceFile::new("a.ts", "").with_imports(["b.ts"]));
            program.add(SourceFile::new("b.ts", "").with_imports(["c.ts"]));
            program.add(SourceFile::new("c.ts", ""));
            program
        }

        #[test]
        fn should_follow_imports_transitively() {
            let program = chained_program();
            let discovery = discovery();
            let mut context = AnalyzerContext::new(AnalyzerConfig::default());
            update(&mut context, &program, &["a.ts", "b.ts", "c.ts"], &discovery, &CancellationToken::new());

            let imported = context.imported_files("a.ts").unwrap();
            assert!(imported.contains("b.ts"));
            assert!(imported.contains("c.ts"));
            assert!(!imported.contains("a.ts"));
        }

        #[test]
        fn should_limit_import_depth() {
            let program = chained_program();
            let discovery = discovery();
            let mut context = AnalyzerContext::new(AnalyzerConfig {
                max_project_import_depth: Some(1),
                ..AnalyzerConfig::default()
            });
            update(&mut context, &program, &["a.ts", "b.ts", "c.ts"], &discovery, &CancellationToken::new());

            let imported = context.imported_files("a.ts").unwrap();
            assert!(imported.contains("b.ts"));
            assert!(!imported.contains("c.ts"));
        }

        #[test]
        fn should_forget_removed_file() {
            let program = chained_program();
            let discovery = discovery();
            let mut context = AnalyzerContext::new(AnalyzerConfig::default());
            update(&mut context, &program, &["a.ts", "b.ts", "c.ts"], &discovery, &CancellationToken::new());

            context.remove_file("c.ts");
            assert!(!context.store().has_tag("x-c"));
            assert!(context.imported_files("c.ts").is_none());
            assert!(context.store().has_tag("x-b"));
        }
    }
}
