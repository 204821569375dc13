//! Operator precedence for binary operators.

use crate::ast::BinaryOp;
use crate::lexer::TokenKind;

/// Operator precedence levels (higher = tighter binding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None = 0,
    Term = 2,     // + -
    Factor = 3,   // * / %
    Exponent = 4, // ^
}

impl Precedence {
    pub fn next(self) -> Precedence {
        match self {
            Precedence::None => Precedence::Term,
            Precedence::Term => Precedence::Factor,
            Precedence::Factor => Precedence::Exponent,
            Precedence::Exponent => Precedence::Exponent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

impl BinaryOp {
    pub fn precedence(self) -> Precedence {
        match self {
            BinaryOp::Add | BinaryOp::Subtract => Precedence::Term,
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => Precedence::Factor,
            BinaryOp::Power => Precedence::Exponent,
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            BinaryOp::Power => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Subtract),
            TokenKind::Star => Some(BinaryOp::Multiply),
            TokenKind::Slash => Some(BinaryOp::Divide),
            TokenKind::Percent => Some(BinaryOp::Modulo),
            TokenKind::Caret => Some(BinaryOp::Power),
            _ => None,
        }
    }
}

pub fn get_precedence(kind: TokenKind) -> Precedence {
    BinaryOp::from_token(kind).map_or(Precedence::None, BinaryOp::precedence)
}
