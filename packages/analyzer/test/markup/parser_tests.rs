/**
 * Markup Parser Tests
 *
 * Tree shape and spans produced by the generic HTML parser.
 */

#[cfg(test)]
mod tests {
    use template_analyzer::markup::ast::{Element, Node};
    use template_analyzer::markup::parse;
    use template_analyzer::parse_util::Range;

    fn elements(nodes: &[Node]) -> Vec<&Element> {
        nodes
            .iter()
            .filter_map(|node| match node {
                Node::Element(el) => Some(el),
                _ => None,
            })
            .collect()
    }

    mod elements {
        use super::*;

        #[test]
        fn should_parse_siblings_and_children() {
            let result = parse("<header><h1>Title</h1></header><main></main>");
            let roots = elements(&result.root_nodes);
            assert_eq!(roots.len(), 2);
            assert_eq!(roots[0].name, "header");
            assert_eq!(elements(&roots[0].children)[0].name, "h1");
            assert!(result.errors.is_empty());
        }

        #[test]
        fn should_keep_written_case() {
            let result = parse("<Foo-Bar></Foo-Bar>");
            let el = elements(&result.root_nodes)[0];
            assert_eq!(el.name, "Foo-Bar");
            assert_eq!(el.lower_name(), "foo-bar");
        }

        #[test]
        fn should_close_void_elements_without_end_tag() {
            let result = parse("<p><br><img src=\"a.png\">after</p>");
            let p = elements(&result.root_nodes)[0];
            let children = elements(&p.children);
            assert_eq!(children.len(), 2);
            assert!(children.iter().all(|el| el.is_void));
            assert!(result.errors.is_empty());
        }

        #[test]
        fn should_report_unexpected_end_tag() {
            let result = parse("<div></span></div>");
            assert_eq!(result.errors.len(), 1);
        }
    }

    mod attributes {
        use super::*;

        #[test]
        fn should_span_names_and_values() {
            let source = "<a href='x' download title=t></a>";
            let result = parse(source);
            let a = elements(&result.root_nodes)[0];
            assert_eq!(a.attrs.len(), 3);

            let href = &a.attrs[0];
            assert_eq!(href.name_span.slice(source), "href");
            assert_eq!(href.value, "x");
            assert_eq!(href.source_span.slice(source), "href='x'");

            let download = &a.attrs[1];
            assert_eq!(download.value_span, None);
            assert_eq!(download.source_span, download.name_span);

            let title = &a.attrs[2];
            assert_eq!(title.value, "t");
        }

        #[test]
        fn should_keep_modifier_in_name() {
            let result = parse("<x-a .prop=\"1\" ?flag @evt=\"h\"></x-a>");
            let names: Vec<&str> = elements(&result.root_nodes)[0]
                .attrs
                .iter()
                .map(|attr| attr.name.as_str())
                .collect();
            assert_eq!(names, vec![".prop", "?flag", "@evt"]);
        }
    }

    mod other_nodes {
        use super::*;

        #[test]
        fn should_parse_comments_and_text() {
            let source = "<!-- note -->text";
            let result = parse(source);
            assert_eq!(result.root_nodes.len(), 2);
            match &result.root_nodes[0] {
                Node::Comment(comment) => {
                    assert_eq!(comment.value.trim(), "note");
                    assert_eq!(comment.source_span, Range::new(0, 13));
                }
                other => panic!("expected comment, got {:?}", other),
            }
            assert!(matches!(&result.root_nodes[1], Node::Text(text) if text.value == "text"));
        }

        #[test]
        fn should_not_parse_markup_inside_style() {
            let result = parse("<style>.a > <b> {}</style>");
            let style = elements(&result.root_nodes)[0];
            assert!(elements(&style.children).is_empty());
        }
    }
}
