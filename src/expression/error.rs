//! Expression-specific error types.
//!
//! Every stage of the pipeline has its own error type. [`ExpressionError`]
//! wraps all of them and is what the public entry points return.

use super::function::{Arity, ComputedFunction};
use thiserror::Error;

/// Tokenizer failure. Positions are 0-based byte offsets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { position: usize, character: char },

    #[error("unknown function '{name}' at position {position}")]
    UnknownFunction { position: usize, name: String },

    #[error("unterminated column name starting at position {position}")]
    UnterminatedColumnName { position: usize },

    #[error("empty column name at position {position}")]
    EmptyColumnName { position: usize },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnknownFunction { position, .. }
            | LexError::UnterminatedColumnName { position }
            | LexError::EmptyColumnName { position } => *position,
        }
    }
}

/// A single grammar violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected}, found {found} at position {position}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: usize,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String, position: usize },

    #[error("function '{function}' takes {expected}, found {found} at position {position}")]
    Arity {
        function: ComputedFunction,
        expected: Arity,
        found: usize,
        position: usize,
    },

    #[error("column \"{name}\" at position {position} is not an expression; apply an operator or function to it")]
    BareColumn { name: String, position: usize },

    #[error("cannot alias column \"{name}\" at position {position}")]
    AliasOnColumn { name: String, position: usize },

    #[error("expression is already named \"{existing}\", cannot rename at position {position}")]
    DuplicateAlias { existing: String, position: usize },

    #[error("expression nested deeper than {max_depth} levels at position {position}")]
    TooDeep { max_depth: usize, position: usize },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::UnexpectedEnd { position, .. }
            | ParseError::Arity { position, .. }
            | ParseError::BareColumn { position, .. }
            | ParseError::AliasOnColumn { position, .. }
            | ParseError::DuplicateAlias { position, .. }
            | ParseError::TooDeep { position, .. } => *position,
        }
    }
}

/// All errors accumulated while parsing one expression. Never empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_errors(.0))]
pub struct ParseErrors(Vec<ParseError>);

fn join_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ParseErrors {
    /// Wrap a list of errors. Returns `None` if the list is empty.
    pub fn new(errors: Vec<ParseError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// Errors recorded so far followed by the one that stopped parsing.
    pub(crate) fn ending_with(mut earlier: Vec<ParseError>, last: ParseError) -> Self {
        earlier.push(last);
        Self(earlier)
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.0
    }

    pub fn first(&self) -> &ParseError {
        &self.0[0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.0.iter()
    }
}

impl From<ParseError> for ParseErrors {
    fn from(error: ParseError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A well-formed tree that cannot be turned into a valid config list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("column \"{column}\" is defined twice with different inputs")]
    DuplicateColumn { column: String },

    #[error("column \"{column}\" is named after one of its own inputs")]
    SelfReference { column: String },

    #[error("column \"{column}\" is used both as a data column and as a computed column")]
    DataColumnClash { column: String },
}

/// A parser/builder mismatch. Indicates a bug, never bad user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    #[error("'{function}' formatted with {found} inputs, expected {expected}")]
    FormatterArity {
        function: &'static str,
        expected: Arity,
        found: usize,
    },
}

/// Any failure of the expression pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("expression is {length} bytes long, limit is {max}")]
    TooLong { length: usize, max: usize },

    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseErrors),

    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    #[error("Internal error: {0}")]
    Internal(#[from] InternalError),
}

pub type ExpressionResult<T> = std::result::Result<T, ExpressionError>;
