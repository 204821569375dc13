//! Expression parsing: precedence climbing for the left-associative levels,
//! recursive descent for unary minus, exponentiation and primaries.

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::{Token, TokenKind};

use super::core::{ParseResult, Parser};
use super::precedence::{get_precedence, Precedence};

impl<'a> Parser<'a> {
    pub(crate) fn expression(&mut self) -> ParseResult<Expr> {
        self.parse_precedence(Precedence::Term)
    }

    /// Parse `+ -` and `* / %` chains, all left-associative.
    ///
    /// `^` never enters this loop; it is handled inside `factor` so that it
    /// nests to the right and binds tighter than a leading minus.
    ///
    /// Each operator in a chain deepens the left spine of the tree, so it
    /// counts against the nesting limit until the chain ends.
    pub(crate) fn parse_precedence(&mut self, min_precedence: Precedence) -> ParseResult<Expr> {
        let outer_depth = self.depth;
        let mut left = self.factor()?;

        loop {
            let kind = self.peek().kind;
            let precedence = get_precedence(kind);
            if precedence < min_precedence || precedence >= Precedence::Exponent {
                break;
            }
            let Some(operator) = BinaryOp::from_token(kind) else {
                break;
            };
            self.descend()?;
            self.advance();

            let right = self.parse_precedence(precedence.next())?;
            left = Expr::binary(left, operator, right);
        }

        self.depth = outer_depth;
        Ok(left)
    }

    /// factor := '+' factor | '-' factor | primary ('^' factor)?
    fn factor(&mut self) -> ParseResult<Expr> {
        self.descend()?;
        let result = self.unary_or_power();
        self.depth -= 1;
        result
    }

    fn unary_or_power(&mut self) -> ParseResult<Expr> {
        if self.match_token(TokenKind::Plus) {
            return self.factor();
        }

        if self.match_token(TokenKind::Minus) {
            let operand = self.factor()?;
            return Ok(Expr::negate(operand));
        }

        let base = self.primary()?;
        if self.match_token(TokenKind::Caret) {
            let exponent = self.factor()?;
            return Ok(Expr::binary(base, BinaryOp::Power, exponent));
        }

        Ok(base)
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let token = self.advance();

        match token.kind {
            TokenKind::Number => self.number(token),

            TokenKind::Identifier => {
                if self.match_token(TokenKind::LeftParen) {
                    let arguments = self.parse_arguments()?;
                    Ok(Expr::call(token.text, arguments))
                } else {
                    Ok(Expr::variable(token.text))
                }
            }

            TokenKind::LeftParen => {
                let expr = self.expression()?;
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(Expr::grouping(expr))
            }

            _ => Err(ParserError::unexpected_token(
                "expression",
                token.describe(),
                token.span,
            )),
        }
    }

    fn number(&self, token: Token<'a>) -> ParseResult<Expr> {
        token
            .text
            .parse::<f64>()
            .map(Expr::number)
            .map_err(|_| ParserError::invalid_number(token.text, token.span))
    }

    /// Arguments after the opening `(`, through the closing `)`.
    pub(crate) fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        let mut arguments = Vec::new();

        if self.match_token(TokenKind::RightParen) {
            return Ok(arguments);
        }

        loop {
            arguments.push(self.expression()?);

            if self.match_token(TokenKind::RightParen) {
                return Ok(arguments);
            }
            if !self.check(TokenKind::Comma) {
                let token = self.peek();
                return Err(ParserError::unexpected_token(
                    "',' or ')'",
                    token.describe(),
                    self.current_span(),
                ));
            }
            self.advance();
        }
    }
}
