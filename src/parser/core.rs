//! Core parser struct and helper methods.

use log::trace;

use crate::ast::Expr;
use crate::error::ParserError;
use crate::lexer::{Scanner, Token, TokenKind};
use crate::span::Span;

pub type ParseResult<T> = Result<T, ParserError>;

/// Deepest tree the parser will build.
///
/// Every nested factor and every operator of a `+ -` or `* / %` chain
/// counts as one level, so compiling, evaluating, printing and dropping a
/// parsed tree all stay within this recursion depth.
pub const MAX_NESTING: usize = 256;

/// Recursive-descent parser pulling tokens lazily from a [`Scanner`].
pub struct Parser<'a> {
    pub(crate) scanner: Scanner<'a>,
    pub(crate) depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            scanner: Scanner::new(source),
            depth: 0,
        }
    }

    /// Parse a complete expression. The whole input must be consumed.
    pub fn parse(&mut self) -> ParseResult<Expr> {
        self.depth = 0;
        let expr = self.expression()?;

        let trailing = self.peek();
        if !trailing.is_eof() {
            return Err(ParserError::trailing_input(
                trailing.describe(),
                trailing.span,
            ));
        }

        trace!("parsed {}", expr);
        Ok(expr)
    }

    // ===== Token manipulation =====

    pub(crate) fn advance(&mut self) -> Token<'a> {
        self.scanner.next_token()
    }

    pub(crate) fn peek(&self) -> Token<'a> {
        self.scanner.peek()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        self.scanner.try_consume(kind)
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token<'a>> {
        let token = self.advance();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(ParserError::unexpected_token(
                expected,
                token.describe(),
                token.span,
            ))
        }
    }

    pub(crate) fn current_span(&self) -> Span {
        self.peek().span
    }

    // ===== Nesting =====

    /// Go one level deeper, failing at the next token once the limit is hit.
    pub(crate) fn descend(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_NESTING {
            return Err(ParserError::too_deep(MAX_NESTING, self.current_span()));
        }
        self.depth += 1;
        Ok(())
    }
}
