//! Token types produced by the lexer.

use super::function::{ComputedFunction, Operator};
use std::fmt;

/// A byte range in the source expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset from the start of the input.
    pub start: usize,
    /// Byte offset of the end of the span (exclusive).
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-length span at `pos`.
    pub fn at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn extend(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A double-quoted column name.
    ColumnRef,
    /// A function keyword from the registry.
    Function(ComputedFunction),
    /// A binary operator.
    Operator(Operator),
    LeftParen,
    RightParen,
    Comma,
    /// The aliasing keyword `AS` (any case).
    As,
}

impl TokenKind {
    /// Human readable name for error messages.
    pub fn display_name(&self) -> String {
        match self {
            TokenKind::ColumnRef => "column name".to_string(),
            TokenKind::Function(function) => format!("function '{}'", function),
            TokenKind::Operator(operator) => format!("operator '{}'", operator),
            TokenKind::LeftParen => "'('".to_string(),
            TokenKind::RightParen => "')'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::As => "AS".to_string(),
        }
    }
}

/// A single token. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token; for column references the unquoted name.
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// 0-based byte position of the token in the source.
    pub fn position(&self) -> usize {
        self.span.start
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::ColumnRef => write!(f, "\"{}\"", self.text),
            _ => write!(f, "{}", self.text),
        }
    }
}
