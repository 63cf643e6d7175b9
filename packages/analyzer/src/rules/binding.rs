//! Rules about the values bound to attributes, properties and events.

use super::util::{
    is_assignable, is_assignable_in_attribute, is_boolean_type, is_complex_type, is_directive,
    member_for, type_b,
};
use super::{FixAction, RuleContext, RuleHooks, RuleMeta, RuleModule, RuleReport};
use crate::config::{SecuritySystem, Severity};
use crate::html_node::{AssignmentKind, HtmlAttrAssignment, HtmlAttrKind, HtmlNodeAttr, MixedPart};
use crate::parse_util::Range;
use crate::schema::{security_context, HtmlMember};
use ts::{SimpleType, TypeChecker, TypeFlags};

/// Characters that commonly trail an interpolation by mistake, e.g. the
/// closing quote of `@click=${fn}"`.
const STRAY_CHARACTERS: &str = "\"'}/;";

fn target_member(attr: &HtmlNodeAttr, ctx: &mut RuleContext<'_>) -> anyhow::Result<Option<HtmlMember>> {
    let node = ctx.owner(attr)?;
    let view = ctx.tag_view(&node.tag_name);
    Ok(member_for(attr, &view).cloned())
}

fn expected_type(attr: &HtmlNodeAttr, ctx: &mut RuleContext<'_>) -> anyhow::Result<Option<SimpleType>> {
    Ok(target_member(attr, ctx)?.and_then(|member| member.member_type().cloned()))
}

fn has_property(attr: &HtmlNodeAttr, ctx: &mut RuleContext<'_>) -> anyhow::Result<bool> {
    let node = ctx.owner(attr)?;
    Ok(ctx.tag_view(&node.tag_name).property(&attr.written_name).is_some())
}

fn value_location(attr: &HtmlNodeAttr, assignment: &HtmlAttrAssignment) -> Range {
    assignment.location().unwrap_or(attr.location.attr)
}

/// A boolean value bound through a plain attribute ends up as the string
/// `"true"` or `"false"`.
fn binds_boolean_as_string(
    checker: &dyn TypeChecker,
    type_a: Option<&SimpleType>,
    type_b: &SimpleType,
) -> bool {
    if type_b.is_any_or_unknown() || !is_boolean_type(type_b) {
        return false;
    }
    match type_a {
        Some(type_a) if type_a.is_any() => false,
        // Enumerated attributes such as `aria-checked` take the string form.
        Some(type_a) if type_a.deep_flags().contains(TypeFlags::STRING_LITERAL) => {
            !is_assignable_in_attribute(checker, type_a, type_b)
        }
        _ => true,
    }
}

/// Whitespace separated tokens with their byte offset.
fn tokens(value: &str) -> Vec<(usize, &str)> {
    let mut found = Vec::new();
    let mut offset = 0;
    for piece in value.split(|c: char| c.is_ascii_whitespace()) {
        if !piece.is_empty() {
            found.push((offset, piece));
        }
        offset += piece.len() + 1;
    }
    found
}

pub struct NoExpressionlessPropertyBinding;

impl RuleModule for NoExpressionlessPropertyBinding {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "no-expressionless-property-binding",
            Severity::Error,
            Severity::Error,
            RuleHooks::ASSIGNMENT,
        )
    }

    fn visit_assignment(
        &self,
        attr: &HtmlNodeAttr,
        assignment: &HtmlAttrAssignment,
        ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<()> {
        if attr.kind != HtmlAttrKind::Property {
            return Ok(());
        }
        let message = format!(
            "You are using a property binding without an expression: '{}'.",
            attr.written_full_name()
        );
        match assignment {
            HtmlAttrAssignment::String { value, location } => {
                let replacement = format!("${{{}}}", serde_json::to_string(value)?);
                let location = *location;
                ctx.report(
                    RuleReport::new(message, attr.location.attr)
                        .fix_message(format!("Use an expression: '{}'", replacement))
                        .fix(move || vec![FixAction::replace(location, replacement)]),
                );
            }
            HtmlAttrAssignment::Boolean => {
                let end = attr.location.attr.end;
                ctx.report(
                    RuleReport::new(message, attr.location.attr)
                        .fix_message("Bind 'true'")
                        .fix(move || vec![FixAction::insert(end, "=${true}")]),
                );
            }
            _ => {}
        }
        Ok(())
    }
}

pub struct NoUnintendedMixedBinding;

impl RuleModule for NoUnintendedMixedBinding {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "no-unintended-mixed-binding",
            Severity::Warning,
            Severity::Warning,
            RuleHooks::ASSIGNMENT,
        )
    }

    fn visit_assignment(
        &self,
        _attr: &HtmlNodeAttr,
        assignment: &HtmlAttrAssignment,
        ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<()> {
        let HtmlAttrAssignment::Mixed { parts, location } = assignment else {
            return Ok(());
        };

        let mut placeholder = None;
        let mut literal = String::new();
        for part in parts {
            match part {
                MixedPart::Expression(expression) => {
                    if placeholder.replace(expression).is_some() {
                        return Ok(());
                    }
                }
                MixedPart::Literal(text) => literal.push_str(text),
            }
        }
        let Some(placeholder) = placeholder else {
            return Ok(());
        };
        if literal.is_empty() || !literal.chars().all(|c| STRAY_CHARACTERS.contains(c)) {
            return Ok(());
        }

        let replacement = format!("${{{}}}", placeholder.text());
        let location = *location;
        ctx.report(
            RuleReport::new(
                format!(
                    "This binding appends '{}' to the expression. This is probably unintended.",
                    literal
                ),
                location,
            )
            .fix_message(format!("Remove '{}'", literal))
            .fix(move || vec![FixAction::replace(location, replacement)]),
        );
        Ok(())
    }
}

pub struct NoInvalidBooleanBinding;

impl RuleModule for NoInvalidBooleanBinding {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "no-invalid-boolean-binding",
            Severity::Error,
            Severity::Error,
            RuleHooks::ASSIGNMENT,
        )
    }

    fn visit_assignment(
        &self,
        attr: &HtmlNodeAttr,
        assignment: &HtmlAttrAssignment,
        ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<()> {
        if attr.kind != HtmlAttrKind::BooleanAttribute {
            return Ok(());
        }

        let supplied = type_b(assignment, ctx.checker)?;
        if supplied.is_any() {
            return Ok(());
        }
        let accepted = SimpleType::union([SimpleType::Boolean, SimpleType::Undefined, SimpleType::Null]);
        if !is_assignable(ctx.checker, &accepted, &supplied) {
            let shown = ctx.checker.type_to_string(&supplied);
            ctx.report(RuleReport::new(
                format!("Type '{}' is not assignable to 'boolean'.", shown),
                value_location(attr, assignment),
            ));
            return Ok(());
        }

        let Some(expected) = expected_type(attr, ctx)? else {
            return Ok(());
        };
        let expected = expected.without_nullish();
        if expected.is_any() || is_assignable(ctx.checker, &SimpleType::Boolean, &expected) {
            return Ok(());
        }

        let Some(modifier) = attr.location.modifier else {
            return Ok(());
        };
        let shown = ctx.checker.type_to_string(&expected);
        let mut report = RuleReport::new(
            format!(
                "You are binding a boolean to the non-boolean attribute '{}' of type '{}'.",
                attr.written_name, shown
            ),
            attr.location.name,
        );
        report = if has_property(attr, ctx)? {
            report
                .fix_message(format!("Use a property binding: '.{}'", attr.written_name))
                .fix(move || vec![FixAction::replace(modifier, ".")])
        } else {
            report
                .fix_message(format!("Use an attribute binding: '{}'", attr.written_name))
                .fix(move || vec![FixAction::remove(modifier)])
        };
        ctx.report(report);
        Ok(())
    }
}

pub struct NoBooleanInAttributeBinding;

impl RuleModule for NoBooleanInAttributeBinding {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "no-boolean-in-attribute-binding",
            Severity::Error,
            Severity::Error,
            RuleHooks::ASSIGNMENT,
        )
    }

    fn visit_assignment(
        &self,
        attr: &HtmlNodeAttr,
        assignment: &HtmlAttrAssignment,
        ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<()> {
        if attr.kind != HtmlAttrKind::Attribute {
            return Ok(());
        }
        let HtmlAttrAssignment::Expression { placeholder, .. } = assignment else {
            return Ok(());
        };
        let supplied = placeholder.inferred_type(ctx.checker)?.without_nullish();
        let expected = expected_type(attr, ctx)?;
        if !binds_boolean_as_string(ctx.checker, expected.as_ref(), &supplied) {
            return Ok(());
        }

        let at = attr.location.name.start;
        ctx.report(
            RuleReport::new(
                format!(
                    "The attribute '{}' is bound to a boolean, which binds the string 'true' or 'false'.",
                    attr.written_name
                ),
                attr.location.name,
            )
            .fix_message(format!("Use a boolean attribute binding: '?{}'", attr.written_name))
            .fix(move || vec![FixAction::insert(at, "?")]),
        );
        Ok(())
    }
}

pub struct NoComplexAttributeBinding;

impl RuleModule for NoComplexAttributeBinding {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "no-complex-attribute-binding",
            Severity::Error,
            Severity::Error,
            RuleHooks::ASSIGNMENT,
        )
    }

    fn visit_assignment(
        &self,
        attr: &HtmlNodeAttr,
        assignment: &HtmlAttrAssignment,
        ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<()> {
        if attr.kind != HtmlAttrKind::Attribute {
            return Ok(());
        }
        let HtmlAttrAssignment::Expression { placeholder, location } = assignment else {
            return Ok(());
        };
        let supplied = placeholder.inferred_type(ctx.checker)?;
        if !is_complex_type(supplied) || is_directive(supplied) {
            return Ok(());
        }
        if expected_type(attr, ctx)?.map_or(false, |expected| expected.is_any()) {
            return Ok(());
        }

        let shown = ctx.checker.type_to_string(supplied);
        let mut report = RuleReport::new(
            format!(
                "You are binding the non-primitive type '{}' to the attribute '{}'. It will be stringified.",
                shown, attr.written_name
            ),
            *location,
        );
        if has_property(attr, ctx)? {
            let at = attr.location.name.start;
            report = report
                .fix_message(format!("Bind the property '.{}' instead", attr.written_name))
                .fix(move || vec![FixAction::insert(at, ".")]);
        }
        ctx.report(report);
        Ok(())
    }
}

pub struct NoNullableAttributeBinding;

impl RuleModule for NoNullableAttributeBinding {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "no-nullable-attribute-binding",
            Severity::Error,
            Severity::Error,
            RuleHooks::ASSIGNMENT,
        )
    }

    fn visit_assignment(
        &self,
        attr: &HtmlNodeAttr,
        assignment: &HtmlAttrAssignment,
        ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<()> {
        if attr.kind != HtmlAttrKind::Attribute {
            return Ok(());
        }
        let HtmlAttrAssignment::Expression { placeholder, location } = assignment else {
            return Ok(());
        };
        let supplied = placeholder.inferred_type(ctx.checker)?;
        if supplied.is_any_or_unknown() || !supplied.is_nullable() || is_directive(supplied) {
            return Ok(());
        }

        let flags = supplied.deep_flags();
        let bound = if flags.intersects(TypeFlags::UNDEFINED | TypeFlags::VOID) {
            "undefined"
        } else {
            "null"
        };
        let shown = ctx.checker.type_to_string(supplied);
        let expression_range = placeholder.expression_range();
        let wrapped = format!("ifDefined({})", placeholder.text());
        ctx.report(
            RuleReport::new(
                format!(
                    "This attribute binds the type '{}' which can end up binding the string '{}'.",
                    shown, bound
                ),
                *location,
            )
            .fix_message(format!("Use '{}'", wrapped))
            .fix(move || vec![FixAction::replace(expression_range, wrapped)]),
        );
        Ok(())
    }
}

pub struct NoIncompatibleTypeBinding;

impl NoIncompatibleTypeBinding {
    /// Trusted-type check for security sensitive bindings. Returns whether
    /// the binding was handled here.
    fn check_security(
        attr: &HtmlNodeAttr,
        assignment: &HtmlAttrAssignment,
        ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<bool> {
        if ctx.config.security_system != SecuritySystem::ClosureSafeTypes
            || !matches!(assignment.kind(), AssignmentKind::Expression | AssignmentKind::Mixed)
        {
            return Ok(false);
        }
        let node = ctx.owner(attr)?;
        let Some(context) = security_context(&node.tag_name, &attr.name) else {
            return Ok(false);
        };

        let supplied = type_b(assignment, ctx.checker)?;
        if !context.accepts(&supplied) {
            let mut allowed: Vec<&str> = context.trusted_type_names().to_vec();
            if context.accepts_string() {
                allowed.push("string");
            }
            let shown = ctx.checker.type_to_string(&supplied);
            ctx.report(RuleReport::new(
                format!(
                    "Type '{}' is not assignable to '{}'. '{}' on <{}> is a {} sink.",
                    shown,
                    allowed.join(" | "),
                    attr.written_name,
                    node.written_name,
                    context
                ),
                value_location(attr, assignment),
            ));
        }
        Ok(true)
    }

    fn report_mismatch(
        ctx: &mut RuleContext<'_>,
        expected: &SimpleType,
        supplied: &SimpleType,
        location: Range,
    ) {
        let message = format!(
            "Type '{}' is not assignable to '{}'.",
            ctx.checker.type_to_string(supplied),
            ctx.checker.type_to_string(expected)
        );
        ctx.report(RuleReport::new(message, location));
    }

    fn check_primitive_array(
        ctx: &mut RuleContext<'_>,
        expected: &SimpleType,
        supplied: &SimpleType,
        assignment: &HtmlAttrAssignment,
        location: Range,
    ) {
        match (assignment, supplied.resolved()) {
            (HtmlAttrAssignment::String { value, location }, _) => {
                for (offset, token) in tokens(value) {
                    let token_type = SimpleType::string_literal(token);
                    if !is_assignable_in_attribute(ctx.checker, expected, &token_type) {
                        let start = location.start + offset;
                        let range = Range::new(start, start + token.len());
                        Self::report_mismatch(ctx, expected, &token_type, range);
                    }
                }
            }
            (_, SimpleType::StringLiteral(value)) => {
                let invalid = tokens(value).into_iter().any(|(_, token)| {
                    !is_assignable_in_attribute(ctx.checker, expected, &SimpleType::string_literal(token))
                });
                if invalid {
                    Self::report_mismatch(ctx, expected, supplied, location);
                }
            }
            _ => {
                if !is_assignable_in_attribute(ctx.checker, expected, supplied) {
                    Self::report_mismatch(ctx, expected, supplied, location);
                }
            }
        }
    }
}

impl RuleModule for NoIncompatibleTypeBinding {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "no-incompatible-type-binding",
            Severity::Error,
            Severity::Error,
            RuleHooks::ASSIGNMENT,
        )
    }

    fn visit_assignment(
        &self,
        attr: &HtmlNodeAttr,
        assignment: &HtmlAttrAssignment,
        ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<()> {
        let kind = assignment.kind();
        let checked = match attr.kind {
            HtmlAttrKind::Attribute => kind != AssignmentKind::ElementExpression,
            HtmlAttrKind::Property => matches!(kind, AssignmentKind::Expression | AssignmentKind::Mixed),
            HtmlAttrKind::BooleanAttribute | HtmlAttrKind::EventListener => false,
        };
        if !checked || Self::check_security(attr, assignment, ctx)? {
            return Ok(());
        }

        let Some(member) = target_member(attr, ctx)? else {
            return Ok(());
        };
        let Some(expected) = member.member_type() else {
            return Ok(());
        };
        if expected.is_any() {
            return Ok(());
        }
        let supplied = type_b(assignment, ctx.checker)?;
        if supplied.is_any() || is_directive(&supplied) {
            return Ok(());
        }
        let location = value_location(attr, assignment);

        if attr.kind == HtmlAttrKind::Property {
            if !is_assignable(ctx.checker, expected, &supplied) {
                Self::report_mismatch(ctx, expected, &supplied, location);
            }
            return Ok(());
        }

        let supplied = match kind {
            AssignmentKind::Expression => supplied.without_nullish(),
            // A bare attribute is present with an empty value.
            AssignmentKind::Boolean => SimpleType::string_literal(""),
            _ => supplied,
        };
        if matches!(supplied, SimpleType::Never)
            || (kind == AssignmentKind::Expression
                && binds_boolean_as_string(ctx.checker, Some(expected), &supplied))
            || is_complex_type(&supplied)
        {
            return Ok(());
        }

        if member.primitive_array {
            Self::check_primitive_array(ctx, expected, &supplied, assignment, location);
        } else if !is_assignable_in_attribute(ctx.checker, expected, &supplied) {
            Self::report_mismatch(ctx, expected, &supplied, location);
        }
        Ok(())
    }
}

pub struct NoNoncallableEventBinding;

impl NoNoncallableEventBinding {
    fn is_listener(ty: &SimpleType) -> bool {
        if ty.is_any_or_unknown() {
            return true;
        }
        ty.union_members()
            .into_iter()
            .filter(|member| !member.flags().intersects(TypeFlags::NULLISH))
            .all(|member| {
                member.is_callable()
                    || member
                        .member("handleEvent")
                        .map_or(false, |handler| handler.ty.is_callable())
            })
    }
}

impl RuleModule for NoNoncallableEventBinding {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "no-noncallable-event-binding",
            Severity::Error,
            Severity::Error,
            RuleHooks::ASSIGNMENT,
        )
    }

    fn visit_assignment(
        &self,
        attr: &HtmlNodeAttr,
        assignment: &HtmlAttrAssignment,
        ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<()> {
        if attr.kind != HtmlAttrKind::EventListener || assignment.kind() == AssignmentKind::Boolean {
            return Ok(());
        }
        let supplied = type_b(assignment, ctx.checker)?;
        if Self::is_listener(&supplied) {
            return Ok(());
        }
        let shown = ctx.checker.type_to_string(&supplied);
        ctx.report(RuleReport::new(
            format!(
                "You are setting up an event listener with the non-callable type '{}'.",
                shown
            ),
            value_location(attr, assignment),
        ));
        Ok(())
    }
}

pub struct NoInvalidDirectiveBinding;

impl RuleModule for NoInvalidDirectiveBinding {
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(
            "no-invalid-directive-binding",
            Severity::Error,
            Severity::Error,
            RuleHooks::ASSIGNMENT,
        )
    }

    fn visit_assignment(
        &self,
        _attr: &HtmlNodeAttr,
        assignment: &HtmlAttrAssignment,
        ctx: &mut RuleContext<'_>,
    ) -> anyhow::Result<()> {
        match assignment {
            HtmlAttrAssignment::ElementExpression { placeholder, location } => {
                let supplied = placeholder.inferred_type(ctx.checker)?;
                if supplied.is_any() || is_directive(supplied) {
                    return Ok(());
                }
                let shown = ctx.checker.type_to_string(supplied);
                ctx.report(RuleReport::new(
                    format!(
                        "Only directives can be bound in element position, found '{}'.",
                        shown
                    ),
                    *location,
                ));
            }
            HtmlAttrAssignment::Mixed { parts, .. } => {
                for part in parts {
                    let MixedPart::Expression(placeholder) = part else {
                        continue;
                    };
                    let supplied = placeholder.inferred_type(ctx.checker)?;
                    if !supplied.is_any() && is_directive(supplied) {
                        ctx.report(RuleReport::new(
                            "Directives cannot be used inside an interpolated attribute value.",
                            placeholder.range(),
                        ));
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}
