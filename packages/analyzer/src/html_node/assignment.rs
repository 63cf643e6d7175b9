//! Attribute value classification.

use super::node::{HtmlAttrAssignment, MixedPart};
use crate::chars;
use crate::document::{DocumentPart, VirtualDocument};
use crate::markup::ast::Attribute;
use crate::parse_util::Range;

/// Classify how the value of `attr` was written.
///
/// Returns `None` when the value region holds nothing at all, in which case
/// the attribute is dropped.
pub fn resolve(attr: &Attribute, document: &VirtualDocument) -> Option<HtmlAttrAssignment> {
    let text = document.text();
    let name_end = attr.name_span.end;
    let raw_end = attr.source_span.end.max(name_end);
    let region = text.get(name_end..raw_end).unwrap_or("");

    let Some(eq) = region.find(chars::EQ) else {
        return Some(HtmlAttrAssignment::Boolean);
    };

    let after_eq = name_end + eq + 1;
    let rest = &text[after_eq..raw_end];
    let value_start = after_eq + (rest.len() - rest.trim_start().len());
    let value_text = &text[value_start..raw_end];

    let (value_range, quoted) = match value_text.chars().next() {
        Some(quote @ (chars::DQ | chars::SQ)) => match value_text.rfind(quote) {
            Some(close) if close > 0 => (Range::new(value_start + 1, value_start + close), true),
            _ => (Range::new(value_start, raw_end), false),
        },
        _ => (Range::new(value_start, raw_end), false),
    };

    let location = document.to_source_range(value_range);
    let parts = document.parts_in_range(value_range);

    match parts.as_slice() {
        // `attr=""` is an empty string; an `=` with nothing after it is dropped.
        [] if quoted => Some(HtmlAttrAssignment::String {
            value: String::new(),
            location,
        }),
        [] => None,
        [DocumentPart::Literal { text, .. }] => Some(HtmlAttrAssignment::String {
            value: text.to_string(),
            location,
        }),
        [DocumentPart::Expression(placeholder)] => Some(HtmlAttrAssignment::Expression {
            placeholder: (*placeholder).clone(),
            location,
        }),
        parts => Some(HtmlAttrAssignment::Mixed {
            parts: parts
                .iter()
                .map(|part| match part {
                    DocumentPart::Literal { text, .. } => MixedPart::Literal(text.to_string()),
                    DocumentPart::Expression(placeholder) => {
                        MixedPart::Expression((*placeholder).clone())
                    }
                })
                .collect(),
            location,
        }),
    }
}

/// The placeholder filling the whole attribute name, if any.
pub fn element_expression(
    attr: &Attribute,
    document: &VirtualDocument,
) -> Option<HtmlAttrAssignment> {
    let parts = document.parts_in_range(attr.name_span);
    match parts.as_slice() {
        [DocumentPart::Expression(placeholder)]
            if document.to_source_range(attr.name_span) == placeholder.range() =>
        {
            Some(HtmlAttrAssignment::ElementExpression {
                placeholder: (*placeholder).clone(),
                location: placeholder.range(),
            })
        }
        _ => None,
    }
}
