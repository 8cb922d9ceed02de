//! Error handling for colexpr
//!
//! This module defines the crate-level error type and a Result alias used by
//! everything outside the expression pipeline (config files, persisted
//! column sets, the CLI).

use crate::expression::ExpressionError;
use thiserror::Error;

/// Main error type for colexpr operations
#[derive(Error, Debug)]
pub enum ColexprError {
    /// Errors from tokenizing, parsing or building an expression
    #[error("Expression error: {0}")]
    Expression(#[from] ExpressionError),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persisted configs that cannot be restored
    #[error("Invalid computed column \"{column}\": {message}")]
    InvalidColumn { column: String, message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ColexprError>,
    },
}

impl ColexprError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ColexprError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for ColexprError {
    fn from(err: serde_json::Error) -> Self {
        ColexprError::Serialization(err.to_string())
    }
}

/// Result type alias for colexpr operations
pub type Result<T> = std::result::Result<T, ColexprError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, ExpressionError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ColexprError::from(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ColexprError::from(e).with_context(f()))
    }
}
