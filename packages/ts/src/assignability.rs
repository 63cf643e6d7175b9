//! Structural assignability over [`SimpleType`].
//!
//! This is the reference answer to "may a value of `source` flow into a slot
//! of `target`?". Hosts with a real compiler may answer differently through
//! their own [`crate::TypeChecker`] implementation; the analyzer only relies
//! on the trait.

use crate::simple_type::{SimpleType, SimpleTypeParameter, TypeFlags};

/// Custom comparison hook. Returning `Some` short-circuits the structural
/// check for that pair; `None` defers to the default rules.
pub type AssignablePredicate<'a> = &'a dyn Fn(&SimpleType, &SimpleType) -> Option<bool>;

const MAX_DEPTH: usize = 32;

#[derive(Clone, Copy)]
pub struct AssignableOptions<'a> {
    /// When false, `null` and `undefined` are assignable to every type.
    pub strict_null_checks: bool,
    /// Consulted before the structural rules at every comparison step.
    pub predicate: Option<AssignablePredicate<'a>>,
}

impl<'a> AssignableOptions<'a> {
    pub fn with_predicate(predicate: AssignablePredicate<'a>) -> Self {
        Self {
            strict_null_checks: true,
            predicate: Some(predicate),
        }
    }
}

impl Default for AssignableOptions<'_> {
    fn default() -> Self {
        Self {
            strict_null_checks: true,
            predicate: None,
        }
    }
}

impl std::fmt::Debug for AssignableOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssignableOptions")
            .field("strict_null_checks", &self.strict_null_checks)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

/// Check whether `source` is assignable to `target`.
pub fn is_assignable_to_simple_type(
    target: &SimpleType,
    source: &SimpleType,
    options: &AssignableOptions<'_>,
) -> bool {
    is_assignable(target, source, options, 0)
}

fn is_assignable(
    target: &SimpleType,
    source: &SimpleType,
    options: &AssignableOptions<'_>,
    depth: usize,
) -> bool {
    if depth > MAX_DEPTH {
        // Recursive types: assume compatible rather than loop forever.
        return true;
    }

    if let Some(predicate) = options.predicate {
        if let Some(result) = predicate(target, source) {
            return result;
        }
    }

    let target = target.resolved();
    let source = source.resolved();
    let next = depth + 1;

    match (target, source) {
        (SimpleType::Any | SimpleType::Unknown, _) => return true,
        (_, SimpleType::Any | SimpleType::Never) => return true,
        _ => {}
    }

    if let SimpleType::Union(sources) = source {
        return sources
            .iter()
            .all(|member| is_assignable(target, member, options, next));
    }

    if let SimpleType::Intersection(targets) = target {
        return targets
            .iter()
            .all(|member| is_assignable(member, source, options, next));
    }

    if let SimpleType::Union(targets) = target {
        // `boolean` is `true | false`, so it may be split across union members.
        if matches!(source, SimpleType::Boolean) {
            let expanded = SimpleType::Union(vec![
                SimpleType::BooleanLiteral(true),
                SimpleType::BooleanLiteral(false),
            ]);
            return is_assignable(target, &expanded, options, next);
        }
        return targets
            .iter()
            .any(|member| is_assignable(member, source, options, next));
    }

    if let SimpleType::Intersection(sources) = source {
        return sources
            .iter()
            .any(|member| is_assignable(target, member, options, next));
    }

    if !options.strict_null_checks && matches!(source, SimpleType::Null | SimpleType::Undefined) {
        return true;
    }

    match (target, source) {
        (SimpleType::Never, _) => false,
        (_, SimpleType::Unknown) => false,

        (SimpleType::String, SimpleType::String | SimpleType::StringLiteral(_)) => true,
        (SimpleType::Number, SimpleType::Number | SimpleType::NumberLiteral(_)) => true,
        (SimpleType::Boolean, SimpleType::Boolean | SimpleType::BooleanLiteral(_)) => true,
        (SimpleType::BigInt, SimpleType::BigInt | SimpleType::BigIntLiteral(_)) => true,
        (SimpleType::EsSymbol, SimpleType::EsSymbol) => true,

        (SimpleType::StringLiteral(a), SimpleType::StringLiteral(b)) => a == b,
        (SimpleType::NumberLiteral(a), SimpleType::NumberLiteral(b)) => a == b,
        (SimpleType::BooleanLiteral(a), SimpleType::BooleanLiteral(b)) => a == b,
        (SimpleType::BigIntLiteral(a), SimpleType::BigIntLiteral(b)) => a == b,

        (SimpleType::Void, SimpleType::Void | SimpleType::Undefined) => true,
        (SimpleType::Undefined, SimpleType::Undefined) => true,
        (SimpleType::Null, SimpleType::Null) => true,

        (SimpleType::Array(target_element), SimpleType::Array(source_element)) => {
            is_assignable(target_element, source_element, options, next)
        }
        (SimpleType::Array(target_element), SimpleType::Tuple(elements)) => elements
            .iter()
            .all(|element| is_assignable(target_element, element, options, next)),
        (SimpleType::Tuple(targets), SimpleType::Tuple(sources)) => {
            targets.len() == sources.len()
                && targets
                    .iter()
                    .zip(sources)
                    .all(|(t, s)| is_assignable(t, s, options, next))
        }

        (
            SimpleType::Function {
                parameters: target_params,
                return_type: target_return,
                ..
            },
            SimpleType::Function {
                parameters: source_params,
                return_type: source_return,
                ..
            },
        ) => is_function_assignable(
            target_params,
            target_return,
            source_params,
            source_return,
            options,
            next,
        ),

        (SimpleType::Object { name: target_name, members, .. }, source) => {
            if source.flags().intersects(TypeFlags::NULLISH) {
                return false;
            }
            if source.flags().intersects(TypeFlags::PRIMITIVE) && !members.is_empty() {
                return false;
            }
            if let (Some(target_name), Some(source_name)) = (target_name, source.name()) {
                if target_name == source_name {
                    return true;
                }
            }
            members.iter().all(|member| match source.member(&member.name) {
                Some(found) => is_assignable(&member.ty, &found.ty, options, next),
                None => member.optional,
            })
        }

        _ => false,
    }
}

fn is_function_assignable(
    target_params: &[SimpleTypeParameter],
    target_return: &SimpleType,
    source_params: &[SimpleTypeParameter],
    source_return: &SimpleType,
    options: &AssignableOptions<'_>,
    depth: usize,
) -> bool {
    let required_source_params = source_params
        .iter()
        .filter(|p| !p.optional && !p.rest)
        .count();
    let target_accepts_rest = target_params.iter().any(|p| p.rest);
    if required_source_params > target_params.len() && !target_accepts_rest {
        return false;
    }

    // Parameters are compared bivariantly, like method parameters.
    let params_ok = target_params
        .iter()
        .zip(source_params)
        .all(|(t, s)| is_assignable(&t.ty, &s.ty, options, depth) || is_assignable(&s.ty, &t.ty, options, depth));

    let return_ok = matches!(target_return.resolved(), SimpleType::Void)
        || is_assignable(target_return, source_return, options, depth);

    params_ok && return_ok
}
