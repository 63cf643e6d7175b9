/**
 * HTML Store Tests
 *
 * Layer priority, absorb/forget bookkeeping and the built-in and
 * configured data as seen through the store.
 */

#[cfg(test)]
mod tests {
    use template_analyzer::config::AnalyzerConfig;
    use template_analyzer::schema::{
        builtin_collection, user_collection, HtmlDataCollection, HtmlDataSource, HtmlMember,
        HtmlMemberKind, HtmlStore, HtmlTag, SourceKind,
    };
    use ts::SimpleType;

    fn tag_with_property(tag: &str, property: &str, ty: SimpleType, source: HtmlDataSource) -> HtmlDataCollection {
        let mut declared = HtmlTag::new(tag, source.clone());
        declared.add_member(
            HtmlMember::new(HtmlMemberKind::Property, property, source)
                .with_type(ty)
                .from_tag(tag),
        );
        HtmlDataCollection {
            tags: vec![declared],
            global: Vec::new(),
        }
    }

    mod priority {
        use super::*;

        #[test]
        fn should_prefer_discovered_over_library() {
            let mut store = HtmlStore::new();
            let library = HtmlDataSource::new(SourceKind::Library, "lib.json");
            let discovered = HtmlDataSource::new(SourceKind::Discovered, "my-el.ts");
            store.absorb(
                SourceKind::Discovered,
                "my-el.ts",
                tag_with_property("my-el", "value", SimpleType::Number, discovered.clone()),
            );
            store.absorb(
                SourceKind::Library,
                "lib.json",
                tag_with_property("my-el", "value", SimpleType::String, library),
            );

            let view = store.query("my-el");
            assert_eq!(view.source(), Some(&discovered));
            assert_eq!(view.declared_by.len(), 2);
            assert_eq!(view.property("value").unwrap().member_type(), Some(&SimpleType::Number));
        }

        #[test]
        fn should_fall_back_after_forget() {
            let mut store = HtmlStore::new();
            let user = HtmlDataSource::user();
            let discovered = HtmlDataSource::new(SourceKind::Discovered, "a.ts");
            store.absorb(SourceKind::User, "config", tag_with_property("a-el", "x", SimpleType::Any, user));
            store.absorb(
                SourceKind::Discovered,
                "a.ts",
                tag_with_property("a-el", "x", SimpleType::Boolean, discovered),
            );
            assert_eq!(store.get_property("a-el", "x").unwrap().member_type(), Some(&SimpleType::Boolean));

            assert!(store.forget(SourceKind::Discovered, "a.ts"));
            assert_eq!(store.get_property("a-el", "x").unwrap().member_type(), Some(&SimpleType::Any));
        }
    }

    mod bookkeeping {
        use super::*;

        #[test]
        fn should_replace_on_repeated_absorb() {
            let mut store = HtmlStore::new();
            let source = HtmlDataSource::new(SourceKind::Discovered, "a.ts");
            for _ in 0..3 {
                store.absorb(
                    SourceKind::Discovered,
                    "a.ts",
                    tag_with_property("a-el", "x", SimpleType::String, source.clone()),
                );
            }
            assert_eq!(store.origins(SourceKind::Discovered), vec!["a.ts"]);
            assert_eq!(store.query("a-el").declared_by.len(), 1);
        }

        #[test]
        fn should_ignore_forget_of_unknown_origin() {
            let mut store = HtmlStore::new();
            assert!(!store.forget(SourceKind::Discovered, "nothing.ts"));
            assert!(store.origins(SourceKind::Discovered).is_empty());
        }

        #[test]
        fn should_list_tags_per_origin() {
            let mut store = HtmlStore::new();
            let a = HtmlDataSource::new(SourceKind::Discovered, "a.ts");
            let b = HtmlDataSource::new(SourceKind::Discovered, "b.ts");
            store.absorb(SourceKind::Discovered, "a.ts", tag_with_property("a-el", "x", SimpleType::String, a));
            store.absorb(SourceKind::Discovered, "b.ts", tag_with_property("b-el", "y", SimpleType::String, b));

            let names: Vec<&str> = store
                .tags_from_origin(SourceKind::Discovered, "b.ts")
                .iter()
                .map(|tag| tag.name.as_str())
                .collect();
            assert_eq!(names, vec!["b-el"]);
            assert_eq!(store.tag_names(), vec!["a-el".to_string(), "b-el".to_string()]);
        }
    }

    mod data {
        use super::*;

        fn builtin_store() -> HtmlStore {
            let mut store = HtmlStore::new();
            store.absorb(SourceKind::Builtin, "builtin", builtin_collection());
            store
        }

        #[test]
        fn should_know_html_elements() {
            let store = builtin_store();
            for tag in ["div", "input", "button", "a", "DIV"] {
                assert!(store.has_tag(tag), "{} should be known", tag);
            }
            assert!(!store.has_tag("unknown-element"));
        }

        #[test]
        fn should_expose_global_members_on_unknown_tags() {
            let store = builtin_store();
            let view = store.query("unknown-element");
            assert!(!view.is_known());
            assert!(view.attribute("id").is_some());
            assert!(view.attribute("class").unwrap().primitive_array);
        }

        #[test]
        fn should_match_attributes_case_insensitively() {
            let store = builtin_store();
            assert!(store.get_attribute("input", "MaxLength").is_some());
            assert!(store.get_property("input", "maxLength").is_some());
        }

        #[test]
        fn should_layer_configured_names_over_builtin() {
            let config = AnalyzerConfig {
                global_tags: vec!["app-shell".to_string()],
                global_attributes: vec!["data-test".to_string()],
                global_events: vec!["my-event".to_string()],
                ..AnalyzerConfig::default()
            };
            let mut store = builtin_store();
            store.absorb(SourceKind::User, "config", user_collection(&config));

            assert!(store.has_tag("app-shell"));
            assert_eq!(
                store.get_attribute("div", "data-test").unwrap().member_type(),
                Some(&SimpleType::Any)
            );
            assert!(store.get_event("app-shell", "my-event").is_some());
        }
    }
}
