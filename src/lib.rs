//! # colexpr: Computed-Column Expressions
//!
//! Compiles computed-column expressions such as `sqrt("a") + "b" AS "total"`
//! into the ordered list of configs a table engine needs to materialize the
//! result column, one config per function or operator application.
//!
//! ## Architecture
//!
//! - **Expression**: lexer, parser, config builder and name formatter
//! - **Session**: the persisted pair of expressions and compiled configs
//! - **Config**: parser limits and output options, loaded from TOML
//!
//! ## Configuration
//!
//! Settings are read from `colexpr/config.toml` in the platform config
//! directory:
//!
//! - **Linux**: `~/.config/colexpr/config.toml`
//! - **macOS**: `~/Library/Application Support/colexpr/config.toml`
//! - **Windows**: `%APPDATA%\colexpr\config.toml`
//!
//! ## Example
//!
//! ```
//! use colexpr::expression_to_computed_column_config;
//!
//! let configs = expression_to_computed_column_config(r#"sqrt("a") + "b""#).unwrap();
//! assert_eq!(configs.len(), 2);
//! assert_eq!(configs[0].column, "sqrt(a)");
//! assert_eq!(configs[1].column, "(sqrt(a) + b)");
//! assert_eq!(configs[1].inputs, vec!["sqrt(a)", "b"]);
//! ```

pub mod config;
pub mod error;
pub mod expression;
pub mod session;

// Re-export commonly used types
pub use config::{ColexprConfig, OutputSettings, ParserSettings};
pub use error::{ColexprError, Result, ResultExt};
pub use expression::{
    expression_to_computed_column_config, ComputedColumnConfig, ComputedFunction,
    ExpressionCompiler, ExpressionError,
};
pub use session::ComputedColumnSet;
