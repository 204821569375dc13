//! Tree-walking evaluator.
//!
//! Evaluates an expression tree directly, without compiling it. Operands are
//! evaluated in the same order as the bytecode VM executes them, so both
//! strategies return identical values and report the same first error.

use crate::ast::{Expr, UnaryOp};
use crate::environment::Environment;
use crate::error::RuntimeError;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// The tree-walking interpreter.
pub struct Interpreter<'e> {
    env: &'e dyn Environment,
}

impl<'e> Interpreter<'e> {
    pub fn new(env: &'e dyn Environment) -> Self {
        Self { env }
    }

    pub fn evaluate(&self, expr: &Expr) -> RuntimeResult<f64> {
        match expr {
            Expr::Number(value) => Ok(*value),

            Expr::Variable(name) => self
                .env
                .lookup_var(name)
                .ok_or_else(|| RuntimeError::undefined_variable(name.as_str())),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                operator.apply(left, right)
            }

            Expr::Unary {
                operator,
                operand,
                postfix,
            } => {
                if *postfix {
                    return Err(RuntimeError::UnsupportedOperator(format!(
                        "postfix {}",
                        operator
                    )));
                }
                let value = self.evaluate(operand)?;
                match operator {
                    UnaryOp::Negate => Ok(-value),
                }
            }

            Expr::Call { name, arguments } => self.evaluate_call(name, arguments),
        }
    }

    fn evaluate_call(&self, name: &str, arguments: &[Expr]) -> RuntimeResult<f64> {
        let args = arguments
            .iter()
            .map(|argument| self.evaluate(argument))
            .collect::<RuntimeResult<Vec<f64>>>()?;

        let func = self
            .env
            .lookup_func(name)
            .ok_or_else(|| RuntimeError::undefined_function(name))?;

        Ok(func(&args)?)
    }
}

/// Evaluate `expr` against `env` by walking the tree.
pub fn evaluate(expr: &Expr, env: &dyn Environment) -> RuntimeResult<f64> {
    Interpreter::new(env).evaluate(expr)
}
