/**
 * Virtual Document Tests
 *
 * Offset mapping and part lookup on documents built from real tagged
 * template literals.
 */

#[path = "../util/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{source_file, TEMPLATE_START};
    use template_analyzer::config::AnalyzerConfig;
    use template_analyzer::document::{find_tagged_templates, DocumentKind, DocumentPart, VirtualDocument};
    use template_analyzer::parse_util::Range;
    use ts::SourceFile;

    fn html(template: &str) -> VirtualDocument {
        find_tagged_templates(&source_file(template), &AnalyzerConfig::default())
            .into_iter()
            .next()
            .unwrap()
    }

    mod offsets {
        use super::*;

        #[test]
        fn should_round_trip_every_offset() {
            let doc = html("<my-el .value=${x} title=\"a ${b} c\"></my-el>");
            for offset in 0..=doc.text().len() {
                let position = doc.offset_to_source_position(offset);
                assert_eq!(position, offset + TEMPLATE_START);
                assert_eq!(doc.source_position_to_offset(position), offset);
            }
        }

        #[test]
        fn should_keep_text_length_equal_to_source_length() {
            let holes = "${a}${ longer.expression }";
            let doc = html(&format!("<p>{}</p>", holes));
            assert_eq!(doc.text().len(), doc.location().len());
            assert_eq!(doc.text(), format!("<p>{}</p>", "_".repeat(holes.len())));
        }

        #[test]
        fn should_map_ranges_both_ways() {
            let doc = html("<div></div>");
            let range = Range::new(1, 4);
            let source = doc.to_source_range(range);
            assert_eq!(source, Range::new(1 + TEMPLATE_START, 4 + TEMPLATE_START));
            assert_eq!(doc.to_document_range(source), range);
        }
    }

    mod parts {
        use super::*;

        #[test]
        fn should_return_clipped_literals_and_placeholders() {
            let template = "<a title=\"x${y}z\">";
            let doc = html(template);
            let start = template.find('x').unwrap();
            let end = template.find('z').unwrap() + 1;
            let parts = doc.parts_in_range(Range::new(start, end));
            assert_eq!(parts.len(), 3);
            assert!(matches!(parts[0], DocumentPart::Literal { text: "x", .. }));
            match &parts[1] {
                DocumentPart::Expression(placeholder) => assert_eq!(placeholder.text(), "y"),
                other => panic!("expected expression, got {:?}", other),
            }
            assert!(matches!(parts[2], DocumentPart::Literal { text: "z", .. }));
        }

        #[test]
        fn should_find_placeholder_at_offset() {
            let template = "<b>${value}</b>";
            let doc = html(template);
            let inside = template.find("value").unwrap();
            assert_eq!(doc.placeholder_at(inside).unwrap().text(), "value");
            assert!(doc.placeholder_at(1).is_none());
        }
    }

    mod css {
        use super::*;

        #[test]
        fn should_keep_css_valid() {
            let file = SourceFile::new("s.ts", "css`:host { margin: ${m}px; ${decl} }`");
            let docs = find_tagged_templates(&file, &AnalyzerConfig::default());
            assert_eq!(docs.len(), 1);
            assert_eq!(docs[0].kind(), DocumentKind::Css);
            assert_eq!(docs[0].text(), ":host { margin: 0000px; _____:0 }");
        }

        #[test]
        fn should_honor_configured_tags() {
            let file = SourceFile::new("s.ts", "myHtml`<p></p>` html`<i></i>`");
            let config = AnalyzerConfig {
                html_template_tags: vec!["myHtml".to_string()],
                ..AnalyzerConfig::default()
            };
            let docs = find_tagged_templates(&file, &config);
            assert_eq!(docs.len(), 1);
            assert_eq!(docs[0].text(), "<p></p>");
        }
    }
}
