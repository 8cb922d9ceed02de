//! Flattens a syntax tree into an ordered list of computed-column configs.
//!
//! The tree is walked post-order, left to right. Every function or operator
//! node emits one [`ComputedColumnConfig`] after its children, so each
//! config only refers to data columns or configs emitted before it.
//! Structurally identical sub-expressions are emitted once and referenced by
//! name afterwards.

use super::ast::SyntaxNode;
use super::error::{BuildError, ExpressionResult};
use super::formatter::format_column_name;
use super::function::FunctionRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One computed column, in the shape the table engine consumes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComputedColumnConfig {
    /// Name of the generated column (synthesized or `AS` alias)
    pub column: String,

    /// Function or operator token, e.g. `sqrt` or `+`
    pub computed_function_name: String,

    /// Data columns or earlier generated columns, in argument order
    pub inputs: Vec<String>,
}

impl ComputedColumnConfig {
    pub fn new(
        column: impl Into<String>,
        computed_function_name: impl Into<String>,
        inputs: Vec<String>,
    ) -> Self {
        Self {
            column: column.into(),
            computed_function_name: computed_function_name.into(),
            inputs,
        }
    }

    /// Resolve `computed_function_name` against the registry.
    pub fn function(&self) -> Option<FunctionRef> {
        FunctionRef::from_name(&self.computed_function_name)
    }
}

/// Counters collected while building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Configs emitted
    pub emitted: usize,

    /// Sub-expressions resolved to an earlier config instead of emitted
    pub deduplicated: usize,

    /// Emitted configs named by `AS`
    pub aliased: usize,
}

/// Build the config list for a single tree.
pub fn build(tree: &SyntaxNode) -> ExpressionResult<Vec<ComputedColumnConfig>> {
    let mut builder = ConfigBuilder::new();
    builder.visit(tree)?;
    Ok(builder.finish())
}

/// Accumulates configs across one or more trees.
///
/// Deduplication and column-name uniqueness span every tree visited by the
/// same builder, and a name is either a data column or a generated column
/// for all of them. On error the builder should be discarded.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    configs: Vec<ComputedColumnConfig>,
    by_definition: HashMap<(FunctionRef, Vec<String>), usize>,
    by_column: HashMap<String, usize>,
    data_columns: HashSet<String>,
    stats: BuildStats,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visit `node` and its children, returning the column name it produces.
    pub fn visit(&mut self, node: &SyntaxNode) -> ExpressionResult<String> {
        match node {
            SyntaxNode::Column { name, .. } => {
                if self.by_column.contains_key(name) {
                    return Err(BuildError::DataColumnClash {
                        column: name.clone(),
                    }
                    .into());
                }
                self.data_columns.insert(name.clone());
                Ok(name.clone())
            }
            SyntaxNode::Paren { inner } => self.visit(inner),
            SyntaxNode::Function {
                function,
                args,
                alias,
            } => {
                let inputs = args
                    .iter()
                    .map(|arg| self.visit(arg))
                    .collect::<ExpressionResult<Vec<_>>>()?;
                self.emit((*function).into(), inputs, alias.as_deref())
            }
            SyntaxNode::BinaryOp {
                operator,
                left,
                right,
                alias,
            } => {
                let left = self.visit(left)?;
                let right = self.visit(right)?;
                self.emit((*operator).into(), vec![left, right], alias.as_deref())
            }
        }
    }

    fn emit(
        &mut self,
        function: FunctionRef,
        inputs: Vec<String>,
        alias: Option<&str>,
    ) -> ExpressionResult<String> {
        let key = (function, inputs);

        if let Some(&index) = self.by_definition.get(&key) {
            let existing = &self.configs[index].column;
            if alias.is_none_or(|alias| alias == existing.as_str()) {
                tracing::trace!("Reusing computed column {:?}", existing);
                self.stats.deduplicated += 1;
                return Ok(existing.clone());
            }
        }

        let (function, inputs) = key;
        let column = match alias {
            Some(alias) => alias.to_string(),
            None => format_column_name(function, &inputs)?,
        };

        if self.by_column.contains_key(&column) {
            return Err(BuildError::DuplicateColumn { column }.into());
        }
        if inputs.contains(&column) {
            return Err(BuildError::SelfReference { column }.into());
        }
        if self.data_columns.contains(&column) {
            return Err(BuildError::DataColumnClash { column }.into());
        }

        tracing::trace!(
            "Emitting computed column {:?} = {}({:?})",
            column,
            function,
            inputs
        );

        let index = self.configs.len();
        self.by_definition
            .entry((function, inputs.clone()))
            .or_insert(index);
        self.by_column.insert(column.clone(), index);
        self.configs.push(ComputedColumnConfig::new(
            column.clone(),
            function.name(),
            inputs,
        ));

        self.stats.emitted += 1;
        if alias.is_some() {
            self.stats.aliased += 1;
        }

        Ok(column)
    }

    /// Configs emitted so far, in dependency order.
    pub fn configs(&self) -> &[ComputedColumnConfig] {
        &self.configs
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn finish(self) -> Vec<ComputedColumnConfig> {
        self.configs
    }
}
