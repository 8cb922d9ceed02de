//! Computed-column expression engine.
//!
//! Turns expression strings into the ordered config list the table engine
//! uses to add computed columns:
//!
//! ```text
//! "sqrt(\"a\") + \"b\""
//!      │ lexer
//!      ▼
//! [sqrt] [(] ["a"] [)] [+] ["b"]
//!      │ parser
//!      ▼
//! BinaryOp(+, Function(sqrt, ["a"]), "b")
//!      │ builder + formatter
//!      ▼
//! [{column: "sqrt(a)", ..}, {column: "(sqrt(a) + b)", ..}]
//! ```
//!
//! # Design
//!
//! - **Fresh state per call**: every compile creates its own lexer, parser
//!   and builder, so nothing leaks between expressions.
//! - **No partial results**: any error discards the whole list.
//! - **Closed registry**: functions and operators are enums; formatting is
//!   an exhaustive match.

pub mod ast;
pub mod builder;
pub mod error;
pub mod formatter;
pub mod function;
pub mod legacy;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::SyntaxNode;
pub use builder::{build, BuildStats, ComputedColumnConfig, ConfigBuilder};
pub use error::{
    BuildError, ExpressionError, ExpressionResult, InternalError, LexError, ParseError,
    ParseErrors,
};
pub use formatter::format_column_name;
pub use function::{Arity, ComputedFunction, FunctionCategory, FunctionRef, Operator};
pub use legacy::{normalize_config, LegacyFunction};
pub use lexer::tokenize;
pub use parser::{parse, Parser};
pub use token::{Span, Token, TokenKind};

use crate::config::ParserSettings;

/// Parse `expression` with default settings and return its config list.
///
/// The last config is the expression's own result column.
pub fn expression_to_computed_column_config(
    expression: &str,
) -> ExpressionResult<Vec<ComputedColumnConfig>> {
    ExpressionCompiler::new().compile(expression)
}

/// Compiles expressions under a fixed set of [`ParserSettings`].
///
/// Holds no per-expression state and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct ExpressionCompiler {
    settings: ParserSettings,
}

impl ExpressionCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ParserSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// Compile a single expression.
    pub fn compile(&self, expression: &str) -> ExpressionResult<Vec<ComputedColumnConfig>> {
        let mut builder = ConfigBuilder::new();
        self.compile_into(&mut builder, expression)?;
        Ok(builder.finish())
    }

    /// Compile several expressions into one list.
    ///
    /// Sub-expressions shared between expressions are emitted once.
    pub fn compile_all<I, S>(&self, expressions: I) -> ExpressionResult<Vec<ComputedColumnConfig>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = ConfigBuilder::new();
        for expression in expressions {
            self.compile_into(&mut builder, expression.as_ref())?;
        }
        Ok(builder.finish())
    }

    /// Compile one expression into an existing builder, returning the name
    /// of its result column.
    pub fn compile_into(
        &self,
        builder: &mut ConfigBuilder,
        expression: &str,
    ) -> ExpressionResult<String> {
        let tree = self.parse(expression)?;
        let before = builder.stats();
        let column = builder.visit(&tree)?;
        let after = builder.stats();

        tracing::debug!(
            "Compiled {:?} into {:?} ({} emitted, {} reused)",
            expression,
            column,
            after.emitted - before.emitted,
            after.deduplicated - before.deduplicated
        );

        Ok(column)
    }

    /// Tokenize and parse without building configs.
    pub fn parse(&self, expression: &str) -> ExpressionResult<SyntaxNode> {
        if expression.len() > self.settings.max_expression_length {
            return Err(ExpressionError::TooLong {
                length: expression.len(),
                max: self.settings.max_expression_length,
            });
        }

        let tokens = tokenize(expression)?;
        let tree = Parser::new(&tokens)
            .with_max_depth(self.settings.max_depth)
            .parse()?;
        Ok(tree)
    }
}
