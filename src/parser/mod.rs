//! Parser module for arithmetic expressions.

mod core;
mod expressions;
pub mod precedence;

#[cfg(test)]
mod tests;

pub use self::core::{ParseResult, Parser, MAX_NESTING};

use crate::ast::Expr;

/// Parse `source` into an expression tree.
pub fn parse(source: &str) -> ParseResult<Expr> {
    Parser::new(source).parse()
}
