use crate::parse_util::Range;
use once_cell::unsync::OnceCell;
use std::rc::Rc;
use ts::{ExpressionRef, SimpleType, TypeCheckError, TypeChecker};

/// An interpolated `${...}` expression inside a template literal.
#[derive(Debug)]
pub struct ExpressionPlaceholder {
    expression: ExpressionRef,
    /// Source span of the whole interpolation, `${` and `}` included.
    range: Range,
    inferred_type: OnceCell<SimpleType>,
}

impl ExpressionPlaceholder {
    pub fn new(expression: ExpressionRef, range: Range) -> Self {
        ExpressionPlaceholder {
            expression,
            range,
            inferred_type: OnceCell::new(),
        }
    }

    pub fn expression(&self) -> &ExpressionRef {
        &self.expression
    }

    pub fn text(&self) -> &str {
        &self.expression.text
    }

    pub fn range(&self) -> Range {
        self.range
    }

    /// Source span of the expression itself, without `${` and `}`.
    pub fn expression_range(&self) -> Range {
        Range::new(self.expression.start, self.expression.end)
    }

    /// Inferred type of the expression. The first successful answer of the
    /// oracle is cached; failures are not.
    pub fn inferred_type(&self, checker: &dyn TypeChecker) -> Result<&SimpleType, TypeCheckError> {
        self.inferred_type
            .get_or_try_init(|| checker.type_of(&self.expression))
    }
}

#[derive(Debug, Clone)]
pub enum TemplatePart {
    Literal { text: String, range: Range },
    Expression(Rc<ExpressionPlaceholder>),
}

impl TemplatePart {
    pub fn literal(text: impl Into<String>, range: Range) -> Self {
        TemplatePart::Literal {
            text: text.into(),
            range,
        }
    }

    pub fn expression(expression: ExpressionRef, range: Range) -> Self {
        TemplatePart::Expression(Rc::new(ExpressionPlaceholder::new(expression, range)))
    }

    /// Source span covered by the part.
    pub fn range(&self) -> Range {
        match self {
            TemplatePart::Literal { range, .. } => *range,
            TemplatePart::Expression(placeholder) => placeholder.range(),
        }
    }
}
