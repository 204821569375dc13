//! Reckon: an arithmetic expression evaluator.
//!
//! Expressions are scanned, parsed into an AST and compiled to a flat
//! bytecode [`Program`] that a stack VM can run any number of times against
//! different variable and function bindings.
//!
//! # Execution Modes
//!
//! - **Bytecode VM**: compile once, run many times (default)
//! - **Tree-walk interpreter**: direct AST evaluation, numerically identical

#![allow(clippy::result_large_err)]

pub mod ast;
pub mod builtins;
pub mod bytecode;
pub mod config;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod logger;
pub mod parser;
pub mod repl;
pub mod session;
pub mod span;

#[cfg(test)]
mod tests;

use lazy_static::lazy_static;

pub use ast::Expr;
pub use bytecode::{Program, Vm, VmConfig};
pub use environment::{EmptyEnvironment, Environment, NativeFn, Scope};
pub use error::{CompileError, ParserError, ReckonError, RuntimeError};
pub use session::{Outcome, Session};

/// Execution mode for evaluating expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Bytecode virtual machine
    #[default]
    Bytecode,
    /// Tree-walking interpreter
    TreeWalk,
}

lazy_static! {
    static ref DEFAULT_VM: Vm = Vm::default();
}

/// Parse expression text into an AST.
pub fn parse(source: &str) -> Result<Expr, ParserError> {
    parser::parse(source)
}

/// Compile an AST into a reusable program.
pub fn compile(expr: &Expr) -> Result<Program, CompileError> {
    bytecode::compile(expr)
}

/// Run a compiled program on a shared, default-configured VM.
pub fn run(program: &Program, env: &dyn Environment) -> Result<f64, RuntimeError> {
    DEFAULT_VM.run(program, env)
}

/// Parse, compile and run an expression.
pub fn eval(source: &str, env: &dyn Environment) -> Result<f64, ReckonError> {
    eval_with_mode(source, env, ExecutionMode::default())
}

/// Evaluate an expression with full control over the execution strategy.
pub fn eval_with_mode(
    source: &str,
    env: &dyn Environment,
    mode: ExecutionMode,
) -> Result<f64, ReckonError> {
    let expr = parse(source)?;

    let value = match mode {
        ExecutionMode::Bytecode => {
            let program = compile(&expr)?;
            run(&program, env)?
        }
        ExecutionMode::TreeWalk => interpreter::evaluate(&expr, env)?,
    };

    Ok(value)
}

/// Render a program listing for debugging.
pub fn disassemble(program: &Program) -> String {
    bytecode::disassemble(program)
}
