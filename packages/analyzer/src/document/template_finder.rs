//! Locates tagged template literals in JavaScript/TypeScript source text.
//!
//! This is a lexical scan, not a parse: it understands comments, string
//! literals, template literals and `${}` nesting, which is enough to find
//! every `tag\`...\`` occurrence and split it into parts.

use super::template_part::TemplatePart;
use super::virtual_document::{DocumentKind, VirtualDocument};
use crate::chars;
use crate::config::AnalyzerConfig;
use crate::parse_util::Range;
use ts::{ExpressionRef, SourceFile};

/// Find every template literal tagged with one of the configured HTML or CSS
/// tags, ordered by position. Nested templates inside `${}` are included.
pub fn find_tagged_templates(file: &SourceFile, config: &AnalyzerConfig) -> Vec<VirtualDocument> {
    let mut scanner = TemplateScanner {
        text: &file.text,
        bytes: file.text.as_bytes(),
        pos: 0,
        file_name: &file.file_name,
        config,
        found: Vec::new(),
    };
    scanner.scan_code(false);

    let mut found = scanner.found;
    found.sort_by_key(|doc| doc.location().start);
    tracing::trace!(file = %file.file_name, count = found.len(), "found tagged templates");
    found
}

struct TemplateScanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    file_name: &'a str,
    config: &'a AnalyzerConfig,
    found: Vec<VirtualDocument>,
}

impl<'a> TemplateScanner<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Scan code until EOF, or until the `}` closing an interpolation when
    /// `in_interpolation` is set. Leaves `pos` on that `}`.
    fn scan_code(&mut self, in_interpolation: bool) {
        let mut depth = 0usize;
        while let Some(byte) = self.peek() {
            match byte {
                b'/' if self.peek_at(1) == Some(b'/') => self.skip_line_comment(),
                b'/' if self.peek_at(1) == Some(b'*') => self.skip_block_comment(),
                b'\'' | b'"' => self.skip_string(byte),
                b'`' => {
                    let tag = self.tag_before(self.pos);
                    self.scan_template(tag);
                }
                b'{' => {
                    depth += 1;
                    self.pos += 1;
                }
                b'}' => {
                    if in_interpolation && depth == 0 {
                        return;
                    }
                    depth = depth.saturating_sub(1);
                    self.pos += 1;
                }
                _ => self.pos += 1,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(byte) = self.peek() {
            if byte == b'\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) {
        self.pos += 2;
        while let Some(byte) = self.peek() {
            if byte == b'*' && self.peek_at(1) == Some(b'/') {
                self.pos += 2;
                return;
            }
            self.pos += 1;
        }
    }

    fn skip_string(&mut self, quote: u8) {
        self.pos += 1;
        while let Some(byte) = self.peek() {
            match byte {
                b'\\' => self.pos = (self.pos + 2).min(self.bytes.len()),
                b'\n' => return,
                _ if byte == quote => {
                    self.pos += 1;
                    return;
                }
                _ => self.pos += 1,
            }
        }
    }

    /// The identifier directly in front of a backtick, whitespace allowed.
    fn tag_before(&self, backtick: usize) -> Option<String> {
        let head = self.text[..backtick].trim_end();
        let start = head
            .char_indices()
            .rev()
            .take_while(|(_, ch)| chars::is_identifier_part(*ch))
            .last()
            .map(|(index, _)| index)?;
        let tag = &head[start..];
        let first = tag.chars().next()?;
        if chars::is_identifier_start(first) {
            Some(tag.to_string())
        } else {
            None
        }
    }

    fn scan_template(&mut self, tag: Option<String>) {
        // Skip the opening backtick.
        self.pos += 1;
        let content_start = self.pos;
        let mut literal_start = self.pos;
        let mut parts = Vec::new();

        let content_end = loop {
            match self.peek() {
                None => {
                    parts.push(self.literal(literal_start, self.pos));
                    break self.pos;
                }
                Some(b'\\') => self.pos = (self.pos + 2).min(self.bytes.len()),
                Some(b'`') => {
                    parts.push(self.literal(literal_start, self.pos));
                    let end = self.pos;
                    self.pos += 1;
                    break end;
                }
                Some(b'$') if self.peek_at(1) == Some(b'{') => {
                    parts.push(self.literal(literal_start, self.pos));
                    let open = self.pos;
                    self.pos += 2;
                    let expression_start = self.pos;
                    self.scan_code(true);
                    let expression_end = self.pos.min(self.bytes.len());
                    // Step over the closing brace unless the file ended first.
                    if self.peek().is_some() {
                        self.pos += 1;
                    }
                    let expression = ExpressionRef::new(
                        self.file_name,
                        expression_start,
                        expression_end,
                        &self.text[expression_start..expression_end],
                    );
                    parts.push(TemplatePart::expression(expression, Range::new(open, self.pos)));
                    literal_start = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        };

        let Some(tag) = tag else {
            return;
        };
        let kind = if self.config.is_html_tag(&tag) {
            DocumentKind::Html
        } else if self.config.is_css_tag(&tag) {
            DocumentKind::Css
        } else {
            return;
        };

        self.found.push(VirtualDocument::new(
            kind,
            self.file_name,
            tag,
            parts,
            Range::new(content_start, content_end),
        ));
    }

    fn literal(&self, start: usize, end: usize) -> TemplatePart {
        TemplatePart::literal(&self.text[start..end], Range::new(start, end))
    }
}
