//! Synthesized column names.
//!
//! Operators format as `(left op right)`, every registry function as
//! `name(arg, ...)`. `pow2` uses the call form like every other function.

use super::error::InternalError;
use super::function::FunctionRef;

/// Canonical name of the column produced by applying `function` to `inputs`.
///
/// The input count must match the function's arity. A mismatch means the
/// builder was handed a tree the parser should have rejected.
pub fn format_column_name(
    function: FunctionRef,
    inputs: &[String],
) -> Result<String, InternalError> {
    let arity = function.arity();
    if !arity.accepts(inputs.len()) {
        return Err(InternalError::FormatterArity {
            function: function.name(),
            expected: arity,
            found: inputs.len(),
        });
    }

    let name = match function {
        FunctionRef::Operator(operator) => {
            format!("({} {} {})", inputs[0], operator.symbol(), inputs[1])
        }
        FunctionRef::Function(function) => format!("{}({})", function.name(), inputs.join(", ")),
    };

    Ok(name)
}
