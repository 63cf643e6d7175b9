//! Rules about the element tree itself: tags, imports, slots.

use super::util::suggest_similar;
use super::{FixAction, RuleContext, RuleHooks, RuleMeta, RuleModule, RuleReport};
use crate::config::Severity;
use crate::html_node::{HtmlNode, NodeLocation};
use crate::parse_util::Range;
use crate::schema::{HtmlMemberKind, SourceKind};

/// Name span inside an end tag written as `</name>`.
fn end_tag_name(location: &NodeLocation, written_name: &str) -> Option<Range> {
    let end_tag = location.end_tag?;
    let start = end_tag.start + 2;
    (start + written_name.len() <= end_tag.end).then(|| Range::new(start, start + written_name.len()))
}

pub struct NoUnclosedTag;

impl RuleModule for NoUnclosedTag {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("no-unclosed-tag", Severity::Warning, Severity::Error, RuleHooks::NODE)
    }

    fn visit_node(&self, node: &HtmlNode, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
        if node.location.end_tag.is_some() || node.self_closed || node.is_void {
            return Ok(());
        }

        let insert_at = node.location.node.end;
        let closing = format!("</{}>", node.written_name);
        ctx.report(
            RuleReport::new(format!("This tag isn't closed: <{}>", node.written_name), node.location.name)
                .fix_message(format!("Add '{}'", closing))
                .fix(move || vec![FixAction::insert(insert_at, closing)]),
        );
        Ok(())
    }
}

pub struct NoUnknownTagName;

impl RuleModule for NoUnknownTagName {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("no-unknown-tag-name", Severity::Warning, Severity::Error, RuleHooks::NODE)
    }

    fn visit_node(&self, node: &HtmlNode, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
        if ctx.tag_view(&node.tag_name).is_known() {
            return Ok(());
        }

        let tag_names = ctx.store.tag_names();
        let similar = suggest_similar(&node.tag_name, tag_names.iter().map(String::as_str));

        let mut report = RuleReport::new(format!("Unknown tag <{}>.", node.written_name), node.location.name);
        let mut hints = Vec::new();
        if let Some(similar) = similar {
            hints.push(format!("Did you mean <{}>?", similar));
        }
        if !ctx.config.dont_suggest_config_changes {
            hints.push(format!(
                "Please consider importing <{}> or adding it to the 'globalTags' configuration.",
                node.tag_name
            ));
        }
        if !hints.is_empty() {
            report = report.suggestion(hints.join(" "));
        }

        if let Some(similar) = similar {
            let replacement = similar.to_string();
            let mut ranges = vec![node.location.name];
            ranges.extend(end_tag_name(&node.location, &node.written_name));
            report = report
                .fix_message(format!("Change tag name to <{}>", replacement))
                .fix(move || {
                    ranges
                        .into_iter()
                        .map(|range| FixAction::replace(range, replacement.as_str()))
                        .collect()
                });
        }

        ctx.report(report);
        Ok(())
    }
}

pub struct NoMissingImport;

impl RuleModule for NoMissingImport {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("no-missing-import", Severity::Off, Severity::Error, RuleHooks::NODE)
    }

    fn visit_node(&self, node: &HtmlNode, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
        if !node.is_custom_element() {
            return Ok(());
        }
        let Some(imported) = ctx.imported_files else {
            return Ok(());
        };

        let view = ctx.tag_view(&node.tag_name);
        let Some(source) = view.source() else {
            return Ok(());
        };
        if source.kind != SourceKind::Discovered
            || source.origin == ctx.file_name
            || imported.contains(&source.origin)
        {
            return Ok(());
        }

        ctx.report(
            RuleReport::new(
                format!("Missing import for <{}>", node.written_name),
                node.location.name,
            )
            .suggestion(format!(
                "<{}> is defined in '{}'. You can disable this check by disabling the 'no-missing-import' rule.",
                node.tag_name, source.origin
            )),
        );
        Ok(())
    }
}

pub struct NoUnknownSlot;

impl RuleModule for NoUnknownSlot {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("no-unknown-slot", Severity::Off, Severity::Warning, RuleHooks::NODE)
    }

    fn visit_node(&self, node: &HtmlNode, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
        let Some(slot_name) = node.slot_name() else {
            return Ok(());
        };
        let Some(parent) = ctx.document()?.parent(node.id) else {
            return Ok(());
        };

        let view = ctx.tag_view(&parent.tag_name);
        let declared = view.member_names(HtmlMemberKind::Slot);
        if declared.is_empty() || declared.contains(&slot_name) {
            return Ok(());
        }

        let location = node
            .attribute("slot")
            .and_then(|attr| attr.assignment.location())
            .unwrap_or(node.location.name);
        let valid = declared
            .iter()
            .map(|name| format!("'{}'", name))
            .collect::<Vec<_>>()
            .join(" | ");
        ctx.report(RuleReport::new(
            format!(
                "Invalid slot name '{}'. Valid slot names for <{}> are: {}",
                slot_name, parent.written_name, valid
            ),
            location,
        ));
        Ok(())
    }
}
