//! Settings that control how expressions are compiled and printed
//!
//! # Main Types
//!
//! - [`ParserSettings`] - Limits and compatibility switches for the parser
//! - [`OutputSettings`] - How the CLI writes config lists
//!
//! Every field has a default, so a config file only needs to name the
//! values it changes:
//!
//! ```toml
//! [parser]
//! max_depth = 32
//!
//! [output]
//! pretty = true
//! ```

use crate::expression::parser::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};

/// Default maximum expression length in bytes
pub const DEFAULT_MAX_EXPRESSION_LENGTH: usize = 16 * 1024;

/// Parser limits and compatibility switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Maximum nesting of parentheses, function calls and operators
    pub max_depth: usize,

    /// Maximum expression length in bytes
    pub max_expression_length: usize,

    /// Accept symbolic function names (`x^2`, `Bucket (10)`) in restored configs
    pub accept_legacy_names: bool,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_expression_length: DEFAULT_MAX_EXPRESSION_LENGTH,
            accept_legacy_names: true,
        }
    }
}

/// Output format for config lists
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Pretty-print JSON output
    pub pretty: bool,

    /// Include the source expressions alongside the configs
    pub include_expressions: bool,
}
