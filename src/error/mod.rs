//! Error types for all evaluation phases.

use crate::span::Span;
use thiserror::Error;

/// Parser errors.
///
/// The scanner never fails: an unknown character becomes an `Unexpected`
/// token and is reported here once the parser reaches it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParserError {
    #[error("Unexpected {found}, expected {expected} at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unexpected {found} after end of expression at {span}")]
    TrailingInput { found: String, span: Span },

    #[error("Invalid number '{0}' at {1}")]
    InvalidNumber(String, Span),

    #[error("Expression nests deeper than {limit} levels at {span}")]
    TooDeep { limit: usize, span: Span },
}

impl ParserError {
    pub fn unexpected_token(
        expected: impl Into<String>,
        found: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    pub fn trailing_input(found: impl Into<String>, span: Span) -> Self {
        Self::TrailingInput {
            found: found.into(),
            span,
        }
    }

    pub fn invalid_number(text: impl Into<String>, span: Span) -> Self {
        Self::InvalidNumber(text.into(), span)
    }

    pub fn too_deep(limit: usize, span: Span) -> Self {
        Self::TooDeep { limit, span }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. } => *span,
            Self::TrailingInput { span, .. } => *span,
            Self::InvalidNumber(_, span) => *span,
            Self::TooDeep { span, .. } => *span,
        }
    }
}

/// Bytecode compilation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("Unsupported {position} operator '{operator}'")]
    UnsupportedOperator {
        operator: String,
        position: &'static str,
    },
}

impl CompileError {
    pub fn unsupported_postfix(operator: impl Into<String>) -> Self {
        Self::UnsupportedOperator {
            operator: operator.into(),
            position: "postfix",
        }
    }
}

/// Errors reported by a callable bound in an environment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FunctionError {
    #[error("{name}() requires {expected} argument{}, got {got}", plural_suffix(.expected))]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("{0}() can no longer be called: its defining scope is gone")]
    Scope(String),

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Runtime(Box<RuntimeError>),
}

fn plural_suffix(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}

impl FunctionError {
    pub fn arity(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Self::Arity {
            name: name.into(),
            expected,
            got,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl From<RuntimeError> for FunctionError {
    fn from(err: RuntimeError) -> Self {
        Self::Runtime(Box::new(err))
    }
}

/// Runtime errors, shared by the bytecode VM and the tree-walking evaluator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("Undefined function '{0}'")]
    UndefinedFunction(String),

    #[error("Stack underflow: {opcode} needs {needed} value(s), found {available}")]
    StackUnderflow {
        opcode: String,
        needed: usize,
        available: usize,
    },

    #[error("Invalid program: {0}")]
    InvalidProgram(String),

    #[error("Unsupported operator '{0}'")]
    UnsupportedOperator(String),

    #[error(transparent)]
    Function(#[from] FunctionError),
}

impl RuntimeError {
    pub fn undefined_variable(name: impl Into<String>) -> Self {
        Self::UndefinedVariable(name.into())
    }

    pub fn undefined_function(name: impl Into<String>) -> Self {
        Self::UndefinedFunction(name.into())
    }

    pub fn stack_underflow(opcode: impl Into<String>, needed: usize, available: usize) -> Self {
        Self::StackUnderflow {
            opcode: opcode.into(),
            needed,
            available,
        }
    }

    pub fn invalid_program(reason: impl Into<String>) -> Self {
        Self::InvalidProgram(reason.into())
    }
}

/// Errors from the definition front end (`x = ...`, `f(x) = ...`).
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Multiple assignment is not supported")]
    MultipleAssignment,

    #[error("Cannot assign to '{0}'")]
    InvalidTarget(String),

    #[error("Function parameters must be plain names, got '{0}'")]
    InvalidParameter(String),
}

/// A unified error type for all phases.
#[derive(Debug, Error)]
pub enum ReckonError {
    #[error("Parser error: {0}")]
    Parser(#[from] ParserError),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("Definition error: {0}")]
    Definition(#[from] DefinitionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_message() {
        let err = FunctionError::arity("sin", 1, 2);
        assert_eq!(err.to_string(), "sin() requires 1 argument, got 2");

        let err = FunctionError::arity("hypot", 2, 3);
        assert_eq!(err.to_string(), "hypot() requires 2 arguments, got 3");
    }

    #[test]
    fn test_function_error_is_propagated_verbatim() {
        let err: RuntimeError = FunctionError::message("domain error").into();
        assert_eq!(err.to_string(), "domain error");
    }

    #[test]
    fn test_parser_error_span() {
        let err = ParserError::trailing_input("')'", Span::new(4, 5));
        assert_eq!(err.span(), Span::new(4, 5));
        assert_eq!(
            err.to_string(),
            "Unexpected ')' after end of expression at column 5"
        );
    }

    #[test]
    fn test_too_deep_message() {
        let err = ParserError::too_deep(256, Span::new(300, 301));
        assert_eq!(err.span(), Span::new(300, 301));
        assert_eq!(
            err.to_string(),
            "Expression nests deeper than 256 levels at column 301"
        );
    }
}
