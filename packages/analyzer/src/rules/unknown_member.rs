//! Rules about attribute, property and event names.

use super::util::{is_boolean_type, suggest_similar};
use super::{FixAction, RuleContext, RuleHooks, RuleMeta, RuleModule, RuleReport};
use crate::config::Severity;
use crate::context::discovery::ComponentDefinition;
use crate::html_node::{HtmlAttrAssignment, HtmlAttrKind, HtmlNodeAttr};
use crate::parse_util::Range;
use crate::schema::{HtmlMember, HtmlMemberKind, HtmlTagView};
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters HTML never allows in an attribute name.
static INVALID_ATTRIBUTE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\s"'>/=\x00-\x1F\x7F-\x9F]"#).unwrap());

static LEGACY_EXPRESSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{.*?\}\}|\[\[.*?\]\]").unwrap());

/// Which config key a member kind is registered through.
fn config_key(kind: HtmlMemberKind) -> Option<&'static str> {
    match kind {
        HtmlMemberKind::Attribute => Some("globalAttributes"),
        HtmlMemberKind::Event => Some("globalEvents"),
        _ => None,
    }
}

/// Report an unknown member with the nearest declared name, and a hint when
/// the name exists as the other binding kind.
fn report_unknown(
    ctx: &mut RuleContext<'_>,
    attr: &HtmlNodeAttr,
    kind: HtmlMemberKind,
    view: &HtmlTagView,
    other: Option<(&HtmlMember, &str)>,
) {
    let mut hints = Vec::new();
    let similar = suggest_similar(&attr.written_name, view.member_names(kind)).map(str::to_string);

    if let Some((member, modifier)) = other {
        hints.push(format!(
            "Did you mean to bind the {} '{}{}' instead?",
            member.kind.describe(),
            modifier,
            member.name
        ));
    } else if let Some(similar) = &similar {
        hints.push(format!("Did you mean '{}'?", similar));
    }
    if let Some(key) = config_key(kind) {
        if !ctx.config.dont_suggest_config_changes {
            hints.push(format!(
                "Please consider adding '{}' to the '{}' configuration.",
                attr.written_name, key
            ));
        }
    }

    let mut report = RuleReport::new(
        format!(
            "Unknown {} '{}' on <{}>.",
            kind.describe(),
            attr.written_name,
            view.name
        ),
        attr.location.name,
    );
    if !hints.is_empty() {
        report = report.suggestion(hints.join(" "));
    }
    if other.is_none() {
        if let Some(similar) = similar {
            let range = attr.location.name;
            report = report
                .fix_message(format!("Change to '{}'", similar))
                .fix(move || vec![FixAction::replace(range, similar)]);
        }
    }
    ctx.report(report);
}

fn is_element_expression(attr: &HtmlNodeAttr) -> bool {
    matches!(attr.assignment, HtmlAttrAssignment::ElementExpression { .. })
}

pub struct NoUnknownAttribute;

impl RuleModule for NoUnknownAttribute {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("no-unknown-attribute", Severity::Off, Severity::Warning, RuleHooks::ATTRIBUTE)
    }

    fn visit_attribute(&self, attr: &HtmlNodeAttr, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
        if !matches!(attr.kind, HtmlAttrKind::Attribute | HtmlAttrKind::BooleanAttribute)
            || is_element_expression(attr)
            || attr.name.starts_with("data-")
            || attr.name.starts_with("aria-")
        {
            return Ok(());
        }
        let node = ctx.owner(attr)?;
        let view = ctx.tag_view(&node.tag_name);
        if !view.is_known() || view.attribute(&attr.name).is_some() {
            return Ok(());
        }
        let other = view.property(&attr.written_name).map(|member| (member, "."));
        report_unknown(ctx, attr, HtmlMemberKind::Attribute, &view, other);
        Ok(())
    }
}

pub struct NoUnknownProperty;

impl RuleModule for NoUnknownProperty {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("no-unknown-property", Severity::Warning, Severity::Error, RuleHooks::ATTRIBUTE)
    }

    fn visit_attribute(&self, attr: &HtmlNodeAttr, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
        if attr.kind != HtmlAttrKind::Property {
            return Ok(());
        }
        let node = ctx.owner(attr)?;
        let view = ctx.tag_view(&node.tag_name);
        if !view.is_known() || view.property(&attr.written_name).is_some() {
            return Ok(());
        }
        // `?` is the natural binding for a boolean attribute.
        let other = view.attribute(&attr.name).map(|member| {
            let is_boolean = member.member_type().map_or(false, is_boolean_type);
            (member, if is_boolean { "?" } else { "" })
        });
        report_unknown(ctx, attr, HtmlMemberKind::Property, &view, other);
        Ok(())
    }
}

pub struct NoUnknownEvent;

impl RuleModule for NoUnknownEvent {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("no-unknown-event", Severity::Off, Severity::Off, RuleHooks::ATTRIBUTE)
    }

    fn visit_attribute(&self, attr: &HtmlNodeAttr, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
        if attr.kind != HtmlAttrKind::EventListener {
            return Ok(());
        }
        let node = ctx.owner(attr)?;
        let view = ctx.tag_view(&node.tag_name);
        if !view.is_known() || view.event(&attr.written_name).is_some() {
            return Ok(());
        }
        report_unknown(ctx, attr, HtmlMemberKind::Event, &view, None);
        Ok(())
    }
}

pub struct NoLegacyAttribute;

impl RuleModule for NoLegacyAttribute {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new("no-legacy-attribute", Severity::Off, Severity::Warning, RuleHooks::ATTRIBUTE)
    }

    fn visit_attribute(&self, attr: &HtmlNodeAttr, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
        let name_range = attr.location.name;

        let renamed = match attr.written_name.len() {
            0 | 1 => None,
            _ => attr
                .written_name
                .strip_suffix('$')
                .map(str::to_string)
                .or_else(|| attr.written_name.strip_suffix('?').map(|name| format!("?{}", name))),
        };
        if let Some(name) = renamed.filter(|_| attr.kind == HtmlAttrKind::Attribute) {
            let full = attr.location.attr;
            ctx.report(
                RuleReport::new(
                    format!("Legacy attribute binding syntax '{}'. Use '{}' instead.", attr.written_name, name),
                    name_range,
                )
                .fix_message(format!("Rename to '{}'", name))
                .fix(move || vec![FixAction::replace(Range::new(full.start, name_range.end), name)]),
            );
            return Ok(());
        }

        if attr.kind == HtmlAttrKind::Attribute && attr.name.starts_with("on-") && attr.name.len() > 3 {
            let event = attr.written_name[3..].to_string();
            let full = attr.location.attr;
            ctx.report(
                RuleReport::new(
                    format!("Legacy event listener syntax '{}'. Use '@{}' instead.", attr.written_name, event),
                    name_range,
                )
                .fix_message(format!("Change to '@{}'", event))
                .fix(move || {
                    vec![FixAction::replace(
                        Range::new(full.start, name_range.end),
                        format!("@{}", event),
                    )]
                }),
            );
            return Ok(());
        }

        if let HtmlAttrAssignment::String { value, location } = &attr.assignment {
            if let Some(found) = LEGACY_EXPRESSION.find(value) {
                let range = Range::new(
                    location.start + found.start(),
                    location.start + found.end(),
                );
                ctx.report(RuleReport::new(
                    format!("Legacy binding syntax '{}'. Use '${{...}}' instead.", found.as_str()),
                    range,
                ));
            }
        }
        Ok(())
    }
}

pub struct NoInvalidAttributeName;

impl NoInvalidAttributeName {
    fn is_valid(name: &str) -> bool {
        !name.is_empty() && !INVALID_ATTRIBUTE_NAME.is_match(name)
    }
}

impl RuleModule for NoInvalidAttributeName {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "no-invalid-attribute-name",
            Severity::Error,
            Severity::Error,
            RuleHooks::ATTRIBUTE | RuleHooks::MEMBER,
        )
    }

    fn visit_attribute(&self, attr: &HtmlNodeAttr, ctx: &mut RuleContext<'_>) -> anyhow::Result<()> {
        if is_element_expression(attr) || Self::is_valid(&attr.written_name) {
            return Ok(());
        }
        ctx.report(RuleReport::new(
            format!("'{}' is not a valid attribute name.", attr.written_name),
            attr.location.name,
        ));
        Ok(())
    }

    fn visit_member(
        &self,
        definition: &ComponentDefinition,
        member: &HtmlMember,
        ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<()> {
        if member.kind != HtmlMemberKind::Attribute || Self::is_valid(&member.name) {
            return Ok(());
        }
        let Some(location) = definition
            .member_location(member.kind, &member.name)
            .or(definition.tag_name_range)
        else {
            tracing::debug!(tag = %definition.tag_name, attribute = %member.name, "invalid attribute name without location");
            return Ok(());
        };
        ctx.report(RuleReport::new(
            format!(
                "'{}' on <{}> is not a valid attribute name.",
                member.name, definition.tag_name
            ),
            location,
        ));
        Ok(())
    }
}
