//! Lazy scanner for expression source text.

use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// The lexer hands out tokens on demand.
///
/// The whole scanner state is a byte offset, so lookahead is a copy of the
/// scanner that is advanced and then thrown away.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    source: &'a str,
    current_pos: usize,
    start_pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            current_pos: 0,
            start_pos: 0,
        }
    }

    /// Scan all tokens up to and including end of input.
    pub fn scan_tokens(&mut self) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        tokens
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();
        self.mark_start();

        let Some(c) = self.advance() else {
            return Token::eof(self.current_pos);
        };

        if let Some(kind) = TokenKind::punctuation(c) {
            return self.make_token(kind, "");
        }

        if c.is_ascii_digit() {
            return self.scan_number();
        }

        if is_identifier_char(c) {
            return self.scan_identifier();
        }

        self.make_token(TokenKind::Unexpected, self.lexeme())
    }

    /// Return the next token without consuming it.
    pub fn peek(&self) -> Token<'a> {
        let mut ahead = *self;
        ahead.next_token()
    }

    /// Consume the next token only if it has the given kind.
    pub fn try_consume(&mut self, kind: TokenKind) -> bool {
        let mut ahead = *self;
        if ahead.next_token().kind == kind {
            *self = ahead;
            true
        } else {
            false
        }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.current_pos
    }

    fn scan_number(&mut self) -> Token<'a> {
        let mut seen_decimal_point = false;

        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.' && !seen_decimal_point {
                seen_decimal_point = true;
                self.advance();
            } else {
                break;
            }
        }

        self.make_token(TokenKind::Number, self.lexeme())
    }

    fn scan_identifier(&mut self) -> Token<'a> {
        while self.peek_char().is_some_and(is_identifier_char) {
            self.advance();
        }

        self.make_token(TokenKind::Identifier, self.lexeme())
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.current_pos..].chars().next()
    }

    fn mark_start(&mut self) {
        self.start_pos = self.current_pos;
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start_pos..self.current_pos]
    }

    fn make_token(&self, kind: TokenKind, text: &'a str) -> Token<'a> {
        Token::new(kind, text, Span::new(self.start_pos, self.current_pos))
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}
