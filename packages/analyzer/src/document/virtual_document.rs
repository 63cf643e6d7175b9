//! Flat text synthesis for one interpolated template.
//!
//! Every placeholder is replaced by a filler of exactly its source length, so
//! an offset into [`VirtualDocument::text`] maps to a source offset by adding
//! the start of the literal's content.

use super::template_part::{ExpressionPlaceholder, TemplatePart};
use crate::chars;
use crate::parse_util::Range;
use smallvec::SmallVec;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Html,
    Css,
}

/// A part of the document intersecting a queried range.
#[derive(Debug, Clone)]
pub enum DocumentPart<'a> {
    /// Literal text clipped to the queried range; `range` is in document offsets.
    Literal { text: &'a str, range: Range },
    Expression(&'a Rc<ExpressionPlaceholder>),
}

impl DocumentPart<'_> {
    pub fn is_expression(&self) -> bool {
        matches!(self, DocumentPart::Expression(_))
    }
}

#[derive(Debug)]
pub struct VirtualDocument {
    file_name: String,
    kind: DocumentKind,
    tag: String,
    parts: Vec<TemplatePart>,
    /// Source span of the literal content, between the backticks.
    location: Range,
    text: String,
}

impl VirtualDocument {
    pub fn new(
        kind: DocumentKind,
        file_name: impl Into<String>,
        tag: impl Into<String>,
        parts: Vec<TemplatePart>,
        location: Range,
    ) -> Self {
        let text = synthesize_text(kind, &parts);
        debug_assert_eq!(text.len(), location.len(), "filler length must match source length");
        VirtualDocument {
            file_name: file_name.into(),
            kind,
            tag: tag.into(),
            parts,
            location,
            text,
        }
    }

    /// Convenience for documents that are a single literal, mostly useful in tests.
    pub fn from_literal(kind: DocumentKind, file_name: &str, text: &str, start: usize) -> Self {
        let range = Range::new(start, start + text.len());
        VirtualDocument::new(
            kind,
            file_name,
            "",
            vec![TemplatePart::literal(text, range)],
            range,
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    pub fn location(&self) -> Range {
        self.location
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Rc<ExpressionPlaceholder>> {
        self.parts.iter().filter_map(|part| match part {
            TemplatePart::Expression(placeholder) => Some(placeholder),
            TemplatePart::Literal { .. } => None,
        })
    }

    pub fn offset_to_source_position(&self, offset: usize) -> usize {
        self.location.start + offset
    }

    pub fn source_position_to_offset(&self, position: usize) -> usize {
        position.saturating_sub(self.location.start)
    }

    pub fn to_source_range(&self, range: Range) -> Range {
        range.offset_by(self.location.start)
    }

    pub fn to_document_range(&self, range: Range) -> Range {
        Range::new(
            self.source_position_to_offset(range.start),
            self.source_position_to_offset(range.end),
        )
    }

    /// Literal substrings (clipped) and placeholders intersecting `range`,
    /// in document order. An empty range yields nothing.
    pub fn parts_in_range(&self, range: Range) -> SmallVec<[DocumentPart<'_>; 4]> {
        let mut result = SmallVec::new();
        if range.is_empty() {
            return result;
        }

        for part in &self.parts {
            let part_range = self.to_document_range(part.range());
            let Some(overlap) = part_range.intersection(&range) else {
                continue;
            };
            match part {
                TemplatePart::Literal { .. } => result.push(DocumentPart::Literal {
                    text: overlap.slice(&self.text),
                    range: overlap,
                }),
                TemplatePart::Expression(placeholder) => {
                    result.push(DocumentPart::Expression(placeholder))
                }
            }
        }
        result
    }

    /// The placeholder whose filler covers the document offset, if any.
    pub fn placeholder_at(&self, offset: usize) -> Option<&Rc<ExpressionPlaceholder>> {
        let position = self.offset_to_source_position(offset);
        self.placeholders().find(|p| {
            let range = p.range();
            range.start <= position && position < range.end
        })
    }
}

fn synthesize_text(kind: DocumentKind, parts: &[TemplatePart]) -> String {
    let mut text = String::new();
    for (index, part) in parts.iter().enumerate() {
        match part {
            TemplatePart::Literal { text: literal, .. } => text.push_str(literal),
            TemplatePart::Expression(placeholder) => {
                let length = placeholder.range().len();
                let filler = match kind {
                    DocumentKind::Html => html_filler(length),
                    DocumentKind::Css => css_filler(
                        length,
                        literal_text(parts, index.checked_sub(1)),
                        literal_text(parts, Some(index + 1)),
                    ),
                };
                text.push_str(&filler);
            }
        }
    }
    text
}

fn literal_text(parts: &[TemplatePart], index: Option<usize>) -> &str {
    match index.and_then(|i| parts.get(i)) {
        Some(TemplatePart::Literal { text, .. }) => text,
        _ => "",
    }
}

fn html_filler(length: usize) -> String {
    chars::UNDERSCORE.to_string().repeat(length)
}

const CSS_UNITS: &[&str] = &[
    "px", "em", "rem", "vh", "vw", "vmin", "vmax", "ch", "ex", "pt", "pc", "cm", "mm", "in", "ms",
    "s", "deg", "rad", "turn", "fr", "dpi", "dppx",
];

/// CSS filler shapes: a number before `%` or a unit, a `name:value` pair when
/// the placeholder is a whole declaration, an identifier otherwise.
fn css_filler(length: usize, before: &str, after: &str) -> String {
    if is_followed_by_unit(after) {
        return "0".repeat(length);
    }

    let before_trimmed = before.trim_end();
    let after_trimmed = after.trim_start();
    let starts_declaration = before_trimmed.is_empty()
        || before_trimmed.ends_with(chars::LBRACE)
        || before_trimmed.ends_with(chars::SEMICOLON);
    let ends_declaration = after_trimmed.is_empty()
        || after_trimmed.starts_with(chars::SEMICOLON)
        || after_trimmed.starts_with(chars::RBRACE);

    if starts_declaration && ends_declaration && length >= 3 {
        return format!("{}{}0", html_filler(length - 2), chars::COLON);
    }

    html_filler(length)
}

fn is_followed_by_unit(after: &str) -> bool {
    if after.starts_with(chars::PERCENT) {
        return true;
    }
    CSS_UNITS.iter().any(|unit| {
        after
            .get(..unit.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(unit))
            && !after[unit.len()..]
                .chars()
                .next()
                .map_or(false, chars::is_identifier_part)
    })
}
