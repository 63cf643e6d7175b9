//! Directive detection.
//!
//! A directive is either a function taking a template part and returning
//! nothing, or an instance of one of the known directive result types. Both
//! may hide behind any number of aliases.

use ts::SimpleType;

const PART_TYPE_NAMES: &[&str] = &[
    "Part",
    "NodePart",
    "ChildPart",
    "AttributePart",
    "PropertyPart",
    "BooleanAttributePart",
    "EventPart",
    "ElementPart",
    "AttributeCommitter",
];

const DIRECTIVE_RESULT_NAMES: &[&str] = &["DirectiveResult", "DirectiveFn", "AsyncDirective"];

const MAX_DEPTH: usize = 16;

pub fn is_directive(ty: &SimpleType) -> bool {
    is_directive_at(ty, 0)
}

fn is_directive_at(ty: &SimpleType, depth: usize) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }
    match ty {
        SimpleType::Alias { target, .. } => is_directive_at(target, depth + 1),
        SimpleType::GenericInstance { name, target, .. } => {
            DIRECTIVE_RESULT_NAMES.contains(&name.as_str()) || is_directive_at(target, depth + 1)
        }
        SimpleType::Object {
            name: Some(name), ..
        } => DIRECTIVE_RESULT_NAMES.contains(&name.as_str()),
        SimpleType::Function {
            parameters,
            return_type,
            ..
        } => {
            let takes_part = parameters
                .first()
                .map_or(false, |param| names_along_aliases(&param.ty).any(|n| PART_TYPE_NAMES.contains(&n)));
            takes_part && matches!(return_type.resolved(), SimpleType::Void)
        }
        _ => false,
    }
}

fn names_along_aliases(ty: &SimpleType) -> impl Iterator<Item = &str> {
    let mut current = Some(ty);
    std::iter::from_fn(move || loop {
        let ty = current?;
        current = match ty {
            SimpleType::Alias { target, .. } | SimpleType::GenericInstance { target, .. } => {
                Some(target.as_ref())
            }
            _ => None,
        };
        if let Some(name) = ty.name() {
            return Some(name);
        }
    })
}
