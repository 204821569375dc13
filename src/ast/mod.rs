//! Abstract syntax tree for arithmetic expressions.

pub mod expr;
mod printer;

pub use expr::{BinaryOp, Expr, UnaryOp};
