//! Computed-column set persisted by a viewer

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{ColexprError, Result, ResultExt};
use crate::expression::{
    normalize_config, ComputedColumnConfig, ConfigBuilder, ExpressionCompiler, FunctionRef,
};

/// Expressions and the config list compiled from them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedColumnSet {
    /// Source expressions, in the order they were added
    #[serde(rename = "computed-columns", default)]
    pub expressions: Vec<String>,

    /// Config list for all expressions, compiled as one batch
    #[serde(rename = "parsed-computed-columns", default)]
    pub parsed: Vec<ComputedColumnConfig>,
}

impl ComputedColumnSet {
    /// Compile `expressions` as one batch.
    pub fn from_expressions<I, S>(compiler: &ExpressionCompiler, expressions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let expressions: Vec<String> = expressions.into_iter().map(Into::into).collect();
        let parsed = compile_each(compiler, &expressions)?;
        Ok(Self {
            expressions,
            parsed,
        })
    }

    /// Load a persisted set and bring it up to date.
    ///
    /// If the set has expressions they are compiled again and the persisted
    /// configs are discarded. Otherwise the persisted configs are kept after
    /// checking their function names, arity and order, and rewriting legacy
    /// names when the compiler's settings allow it.
    pub fn restore(json: &str, compiler: &ExpressionCompiler) -> Result<Self> {
        let persisted = Self::from_json(json)?;

        if !persisted.expressions.is_empty() {
            tracing::debug!(
                "Restoring {} computed columns from expressions",
                persisted.expressions.len()
            );
            return Self::from_expressions(compiler, persisted.expressions);
        }

        let accept_legacy = compiler.settings().accept_legacy_names;
        let generated: HashSet<&str> = persisted
            .parsed
            .iter()
            .map(|config| config.column.as_str())
            .collect();
        let mut seen: HashSet<String> = HashSet::new();
        let mut parsed = Vec::with_capacity(persisted.parsed.len());

        for config in &persisted.parsed {
            let restored = if accept_legacy {
                normalize_config(config)
            } else {
                FunctionRef::from_name(&config.computed_function_name).map(|_| config.clone())
            };

            let restored = restored.ok_or_else(|| ColexprError::InvalidColumn {
                column: config.column.clone(),
                message: format!(
                    "unknown function {:?}",
                    config.computed_function_name
                ),
            })?;

            check_arity(&restored)?;

            // Inputs may only point back to columns restored earlier
            if let Some(input) = restored
                .inputs
                .iter()
                .find(|input| generated.contains(input.as_str()) && !seen.contains(*input))
            {
                return Err(ColexprError::InvalidColumn {
                    column: restored.column.clone(),
                    message: format!("input {:?} is used before it is defined", input),
                });
            }

            if !seen.insert(restored.column.clone()) {
                return Err(ColexprError::InvalidColumn {
                    column: restored.column,
                    message: "defined more than once".to_string(),
                });
            }

            parsed.push(restored);
        }

        tracing::debug!("Restored {} persisted computed columns", parsed.len());

        Ok(Self {
            expressions: Vec::new(),
            parsed,
        })
    }

    /// Compile one more expression and add its configs to the set.
    ///
    /// Returns the name of the expression's result column.
    pub fn push(&mut self, compiler: &ExpressionCompiler, expression: &str) -> Result<String> {
        let mut expressions = self.expressions.clone();
        expressions.push(expression.to_string());
        let parsed = compile_each(compiler, &expressions)?;

        let column = parsed
            .last()
            .map(|config| config.column.clone())
            .unwrap_or_default();

        self.expressions = expressions;
        self.parsed = parsed;
        Ok(column)
    }

    /// Names of all generated columns, in dependency order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.parsed.iter().map(|config| config.column.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty() && self.parsed.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Compile a batch, tagging any failure with the expression that caused it.
fn compile_each(
    compiler: &ExpressionCompiler,
    expressions: &[String],
) -> Result<Vec<ComputedColumnConfig>> {
    let mut builder = ConfigBuilder::new();
    for (index, expression) in expressions.iter().enumerate() {
        compiler
            .compile_into(&mut builder, expression)
            .with_context(|| format!("Expression #{} {:?}", index + 1, expression))?;
    }
    Ok(builder.finish())
}

fn check_arity(config: &ComputedColumnConfig) -> Result<()> {
    let Some(function) = config.function() else {
        return Ok(());
    };

    let arity = function.arity();
    if arity.accepts(config.inputs.len()) {
        Ok(())
    } else {
        Err(ColexprError::InvalidColumn {
            column: config.column.clone(),
            message: format!(
                "'{}' takes {}, found {}",
                function.name(),
                arity,
                config.inputs.len()
            ),
        })
    }
}
