//! Expression AST nodes.

use crate::error::RuntimeError;

/// All expression variants.
///
/// Every node owns its children; a tree is never shared or cyclic.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal: 3.14
    Number(f64),

    /// Binary operation: a + b
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
    },

    /// Unary operation: -a
    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
        postfix: bool,
    },

    /// Parenthesized expression: (a)
    Grouping(Box<Expr>),

    /// Variable reference: foo
    Variable(String),

    /// Function call: foo(a, b)
    Call { name: String, arguments: Vec<Expr> },
}

impl Expr {
    pub fn number(value: f64) -> Self {
        Expr::Number(value)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn binary(left: Expr, operator: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn negate(operand: Expr) -> Self {
        Expr::Unary {
            operator: UnaryOp::Negate,
            operand: Box::new(operand),
            postfix: false,
        }
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Box::new(inner))
    }

    pub fn call(name: impl Into<String>, arguments: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            arguments,
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Subtract => write!(f, "-"),
            BinaryOp::Multiply => write!(f, "*"),
            BinaryOp::Divide => write!(f, "/"),
            BinaryOp::Modulo => write!(f, "%"),
            BinaryOp::Power => write!(f, "^"),
        }
    }
}

impl BinaryOp {
    /// Apply the operator to two operands.
    ///
    /// Both execution strategies go through here so they agree bit for bit.
    /// Division by zero is an error; `%` is the floating-point remainder,
    /// so `x % 0` is NaN.
    pub fn apply(self, left: f64, right: f64) -> Result<f64, RuntimeError> {
        match self {
            BinaryOp::Add => Ok(left + right),
            BinaryOp::Subtract => Ok(left - right),
            BinaryOp::Multiply => Ok(left * right),
            BinaryOp::Divide => {
                if right == 0.0 {
                    Err(RuntimeError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
            BinaryOp::Modulo => Ok(left % right),
            BinaryOp::Power => Ok(left.powf(right)),
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Negate => write!(f, "-"),
        }
    }
}
