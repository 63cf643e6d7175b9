//! Type helpers shared by the binding rules.
//!
//! `type_a` is what the element expects for a binding, `type_b` is what the
//! template supplies.

use crate::html_node::{HtmlAttrAssignment, HtmlAttrKind, HtmlNodeAttr};
use crate::schema::{HtmlMember, HtmlTagView};
use ts::{format_number, AssignableOptions, SimpleType, TypeChecker, TypeFlags};

/// The schema member a binding targets, looked up by its kind.
pub fn member_for<'v>(attr: &HtmlNodeAttr, view: &'v HtmlTagView) -> Option<&'v HtmlMember> {
    match attr.kind {
        HtmlAttrKind::Attribute | HtmlAttrKind::BooleanAttribute => view.attribute(&attr.name),
        HtmlAttrKind::Property => view.property(&attr.written_name),
        HtmlAttrKind::EventListener => view.event(&attr.written_name),
    }
}

/// Expected type of the binding. `None` when the member is unknown or
/// declared without a type.
pub fn type_a(attr: &HtmlNodeAttr, view: &HtmlTagView) -> Option<SimpleType> {
    member_for(attr, view)?.member_type().cloned()
}

/// Supplied type of an assignment.
pub fn type_b(assignment: &HtmlAttrAssignment, checker: &dyn TypeChecker) -> anyhow::Result<SimpleType> {
    let ty = match assignment {
        HtmlAttrAssignment::Boolean => SimpleType::BooleanLiteral(true),
        HtmlAttrAssignment::String { value, .. } => SimpleType::string_literal(value.as_str()),
        HtmlAttrAssignment::Expression { placeholder, .. }
        | HtmlAttrAssignment::ElementExpression { placeholder, .. } => {
            placeholder.inferred_type(checker)?.clone()
        }
        HtmlAttrAssignment::Mixed { .. } => SimpleType::String,
    };
    Ok(ty)
}

pub fn is_assignable(checker: &dyn TypeChecker, target: &SimpleType, source: &SimpleType) -> bool {
    checker.is_assignable(target, source, &AssignableOptions::default())
}

/// Assignability through an attribute, where every value is serialized to a
/// string first.
pub fn is_assignable_in_attribute(
    checker: &dyn TypeChecker,
    target: &SimpleType,
    source: &SimpleType,
) -> bool {
    let options = AssignableOptions::with_predicate(&attribute_coercion);
    checker.is_assignable(target, source, &options)
}

fn attribute_coercion(target: &SimpleType, source: &SimpleType) -> Option<bool> {
    use SimpleType::*;

    match (target.resolved(), source.resolved()) {
        (Number, StringLiteral(text)) => parse_number(text).map(|_| true),
        (NumberLiteral(expected), StringLiteral(text)) => {
            parse_number(text).filter(|n| n == expected).map(|_| true)
        }
        (Boolean | BooleanLiteral(true), StringLiteral(text)) if text.is_empty() => Some(true),
        (
            String,
            Number | Boolean | BigInt | NumberLiteral(_) | BooleanLiteral(_) | BigIntLiteral(_),
        ) => Some(true),
        (StringLiteral(expected), NumberLiteral(value)) if *expected == format_number(*value) => {
            Some(true)
        }
        (StringLiteral(expected), BooleanLiteral(value)) if *expected == value.to_string() => {
            Some(true)
        }
        _ => None,
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// True for `boolean`, `true`, `false` and unions of them, nullish members
/// aside.
pub fn is_boolean_type(ty: &SimpleType) -> bool {
    let flags = ty.deep_flags() - TypeFlags::NULLISH;
    !flags.is_empty() && (TypeFlags::BOOLEAN | TypeFlags::BOOLEAN_LITERAL).contains(flags)
}

/// Objects, arrays and functions: values an attribute cannot carry.
pub fn is_complex_type(ty: &SimpleType) -> bool {
    if ty.is_any_or_unknown() {
        return false;
    }
    ty.union_members().into_iter().any(|member| {
        member.flags().intersects(
            TypeFlags::OBJECT
                | TypeFlags::FUNCTION
                | TypeFlags::ARRAY
                | TypeFlags::TUPLE
                | TypeFlags::INTERSECTION,
        )
    })
}
