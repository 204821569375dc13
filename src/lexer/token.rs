//! Token definitions for the expression lexer.

use crate::span::Span;

/// All token types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Number,
    Identifier,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,

    // Delimiters
    LeftParen,
    RightParen,
    Comma,

    // Special
    Unexpected,
    Eof,
}

impl TokenKind {
    /// Map a single punctuation character to its token kind.
    pub fn punctuation(c: char) -> Option<TokenKind> {
        match c {
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Star),
            '/' => Some(TokenKind::Slash),
            '%' => Some(TokenKind::Percent),
            '^' => Some(TokenKind::Caret),
            '(' => Some(TokenKind::LeftParen),
            ')' => Some(TokenKind::RightParen),
            ',' => Some(TokenKind::Comma),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Number => write!(f, "number"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::Caret => write!(f, "'^'"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Unexpected => write!(f, "character"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with its kind, source text and location.
///
/// `text` is empty for operators, punctuation and end of input. It holds the
/// lexeme for numbers, identifiers and unexpected characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, span: Span) -> Self {
        Self { kind, text, span }
    }

    pub fn eof(position: usize) -> Self {
        Self::new(TokenKind::Eof, "", Span::point(position))
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Human readable description used in parser diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Number => format!("number '{}'", self.text),
            TokenKind::Identifier => format!("identifier '{}'", self.text),
            TokenKind::Unexpected => format!("character '{}'", self.text),
            kind => kind.to_string(),
        }
    }
}
