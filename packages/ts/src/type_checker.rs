use crate::assignability::{is_assignable_to_simple_type, AssignableOptions};
use crate::simple_type::SimpleType;
use std::fmt::Debug;
use thiserror::Error;

/// A reference to an interpolated expression inside a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpressionRef {
    pub file_name: String,
    /// Offset of the first character of the expression (after `${`).
    pub start: usize,
    /// Offset just past the last character of the expression (before `}`).
    pub end: usize,
    pub text: String,
}

impl ExpressionRef {
    pub fn new(file_name: impl Into<String>, start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            start,
            end,
            text: text.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TypeCheckError {
    #[error("no type information for expression `{text}` in {file_name}")]
    UnknownExpression { file_name: String, text: String },

    #[error("type checker failure: {0}")]
    Internal(String),
}

/// The type oracle.
///
/// Implementations infer the type of template expressions and answer
/// assignability questions between two structural types.
pub trait TypeChecker: Debug {
    fn type_of(&self, expression: &ExpressionRef) -> Result<SimpleType, TypeCheckError>;

    fn is_assignable(
        &self,
        target: &SimpleType,
        source: &SimpleType,
        options: &AssignableOptions<'_>,
    ) -> bool {
        is_assignable_to_simple_type(target, source, options)
    }

    fn type_to_string(&self, ty: &SimpleType) -> String {
        ty.to_string()
    }
}
