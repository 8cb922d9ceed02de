//! Legacy symbolic function names.
//!
//! Older viewers stored `computed_function_name` as a display key such as
//! `x^2` or `Bucket (10)` instead of the registry token. These keys are only
//! recognized when restoring persisted configs; the expression language
//! never accepts them.

use super::builder::ComputedColumnConfig;
use super::function::{ComputedFunction, FunctionRef};

/// A symbolic key from the older computed-column menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyFunction {
    pub symbol: &'static str,
    pub function: ComputedFunction,
}

const LEGACY_FUNCTIONS: &[(&str, ComputedFunction)] = &[
    ("x^2", ComputedFunction::Pow2),
    ("1/x", ComputedFunction::Invert),
    ("Bucket (10)", ComputedFunction::Bin10),
    ("Bucket (100)", ComputedFunction::Bin100),
    ("Bucket (1000)", ComputedFunction::Bin1000),
    ("Bucket (1/10)", ComputedFunction::Bin10th),
    ("Bucket (1/100)", ComputedFunction::Bin100th),
    ("Bucket (1/1000)", ComputedFunction::Bin1000th),
    ("Uppercase", ComputedFunction::Uppercase),
    ("Lowercase", ComputedFunction::Lowercase),
    ("Hour of Day", ComputedFunction::HourOfDay),
    ("Day of Week", ComputedFunction::DayOfWeek),
    ("Month of Year", ComputedFunction::MonthOfYear),
    ("Bucket (s)", ComputedFunction::SecondBucket),
    ("Bucket (m)", ComputedFunction::MinuteBucket),
    ("Bucket (h)", ComputedFunction::HourBucket),
    ("Bucket (D)", ComputedFunction::DayBucket),
    ("Bucket (W)", ComputedFunction::WeekBucket),
    ("Bucket (M)", ComputedFunction::MonthBucket),
    ("Bucket (Y)", ComputedFunction::YearBucket),
];

impl LegacyFunction {
    /// Look up a symbolic key. Case-sensitive.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::all().find(|f| f.symbol == symbol)
    }

    pub fn all() -> impl Iterator<Item = LegacyFunction> {
        LEGACY_FUNCTIONS
            .iter()
            .map(|&(symbol, function)| LegacyFunction { symbol, function })
    }
}

/// Resolve either a registry token or a legacy key.
pub fn resolve_function_name(name: &str) -> Option<FunctionRef> {
    FunctionRef::from_name(name)
        .or_else(|| LegacyFunction::from_symbol(name).map(|f| FunctionRef::Function(f.function)))
}

/// Rewrite a persisted config to use the registry token.
///
/// The column name and inputs are kept as persisted. Returns `None` if the
/// function name is neither a registry token nor a legacy key.
pub fn normalize_config(config: &ComputedColumnConfig) -> Option<ComputedColumnConfig> {
    let function = resolve_function_name(&config.computed_function_name)?;

    if function.name() != config.computed_function_name {
        tracing::warn!(
            "Rewriting legacy function {:?} to {:?} for column {:?}",
            config.computed_function_name,
            function.name(),
            config.column
        );
    }

    Some(ComputedColumnConfig {
        computed_function_name: function.name().to_string(),
        ..config.clone()
    })
}
