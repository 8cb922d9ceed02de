//! Function and operator registry.
//!
//! Every function the expression language accepts is a variant of
//! [`ComputedFunction`]. The canonical token is also the prefix of the
//! synthesized column name and the `computed_function_name` handed to the
//! table engine, so one enum serves the lexer, parser and formatter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` arguments.
    Exactly(usize),
    /// `n` or more arguments.
    AtLeast(usize),
}

impl Arity {
    /// Check whether `count` arguments satisfy this arity.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(1) => write!(f, "exactly 1 argument"),
            Arity::Exactly(n) => write!(f, "exactly {} arguments", n),
            Arity::AtLeast(n) => write!(f, "at least {} arguments", n),
        }
    }
}

/// Category of a computed function, used for grouping in the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionCategory {
    Numeric,
    String,
    Datetime,
}

/// A function from the fixed registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputedFunction {
    // Numeric
    Sqrt,
    Pow2,
    Abs,
    Invert,
    Log,
    Exp,
    Bin10,
    Bin100,
    Bin1000,
    Bin10th,
    Bin100th,
    Bin1000th,

    // String
    Uppercase,
    Lowercase,
    Length,
    ConcatComma,
    ConcatSpace,

    // Datetime
    HourOfDay,
    DayOfWeek,
    MonthOfYear,
    SecondBucket,
    MinuteBucket,
    HourBucket,
    DayBucket,
    WeekBucket,
    MonthBucket,
    YearBucket,
}

impl ComputedFunction {
    /// The canonical token for this function.
    pub fn name(self) -> &'static str {
        match self {
            ComputedFunction::Sqrt => "sqrt",
            ComputedFunction::Pow2 => "pow2",
            ComputedFunction::Abs => "abs",
            ComputedFunction::Invert => "invert",
            ComputedFunction::Log => "log",
            ComputedFunction::Exp => "exp",
            ComputedFunction::Bin10 => "bin10",
            ComputedFunction::Bin100 => "bin100",
            ComputedFunction::Bin1000 => "bin1000",
            ComputedFunction::Bin10th => "bin10th",
            ComputedFunction::Bin100th => "bin100th",
            ComputedFunction::Bin1000th => "bin1000th",
            ComputedFunction::Uppercase => "uppercase",
            ComputedFunction::Lowercase => "lowercase",
            ComputedFunction::Length => "length",
            ComputedFunction::ConcatComma => "concat_comma",
            ComputedFunction::ConcatSpace => "concat_space",
            ComputedFunction::HourOfDay => "hour_of_day",
            ComputedFunction::DayOfWeek => "day_of_week",
            ComputedFunction::MonthOfYear => "month_of_year",
            ComputedFunction::SecondBucket => "second_bucket",
            ComputedFunction::MinuteBucket => "minute_bucket",
            ComputedFunction::HourBucket => "hour_bucket",
            ComputedFunction::DayBucket => "day_bucket",
            ComputedFunction::WeekBucket => "week_bucket",
            ComputedFunction::MonthBucket => "month_bucket",
            ComputedFunction::YearBucket => "year_bucket",
        }
    }

    /// Look up a function by its canonical token. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.name() == name)
    }

    /// Get all registered functions.
    pub fn all() -> &'static [ComputedFunction] {
        &[
            ComputedFunction::Sqrt,
            ComputedFunction::Pow2,
            ComputedFunction::Abs,
            ComputedFunction::Invert,
            ComputedFunction::Log,
            ComputedFunction::Exp,
            ComputedFunction::Bin10,
            ComputedFunction::Bin100,
            ComputedFunction::Bin1000,
            ComputedFunction::Bin10th,
            ComputedFunction::Bin100th,
            ComputedFunction::Bin1000th,
            ComputedFunction::Uppercase,
            ComputedFunction::Lowercase,
            ComputedFunction::Length,
            ComputedFunction::ConcatComma,
            ComputedFunction::ConcatSpace,
            ComputedFunction::HourOfDay,
            ComputedFunction::DayOfWeek,
            ComputedFunction::MonthOfYear,
            ComputedFunction::SecondBucket,
            ComputedFunction::MinuteBucket,
            ComputedFunction::HourBucket,
            ComputedFunction::DayBucket,
            ComputedFunction::WeekBucket,
            ComputedFunction::MonthBucket,
            ComputedFunction::YearBucket,
        ]
    }

    /// Number of arguments this function takes.
    pub fn arity(self) -> Arity {
        match self {
            ComputedFunction::ConcatComma | ComputedFunction::ConcatSpace => Arity::AtLeast(2),
            _ => Arity::Exactly(1),
        }
    }

    pub fn category(self) -> FunctionCategory {
        match self {
            ComputedFunction::Sqrt
            | ComputedFunction::Pow2
            | ComputedFunction::Abs
            | ComputedFunction::Invert
            | ComputedFunction::Log
            | ComputedFunction::Exp
            | ComputedFunction::Bin10
            | ComputedFunction::Bin100
            | ComputedFunction::Bin1000
            | ComputedFunction::Bin10th
            | ComputedFunction::Bin100th
            | ComputedFunction::Bin1000th => FunctionCategory::Numeric,
            ComputedFunction::Uppercase
            | ComputedFunction::Lowercase
            | ComputedFunction::Length
            | ComputedFunction::ConcatComma
            | ComputedFunction::ConcatSpace => FunctionCategory::String,
            ComputedFunction::HourOfDay
            | ComputedFunction::DayOfWeek
            | ComputedFunction::MonthOfYear
            | ComputedFunction::SecondBucket
            | ComputedFunction::MinuteBucket
            | ComputedFunction::HourBucket
            | ComputedFunction::DayBucket
            | ComputedFunction::WeekBucket
            | ComputedFunction::MonthBucket
            | ComputedFunction::YearBucket => FunctionCategory::Datetime,
        }
    }
}

impl fmt::Display for ComputedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Percent,
    Power,
}

/// Binding strength of a binary operator (higher binds tighter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    AddSub = 1,
    MulDiv = 2,
    Power = 3,
}

impl Precedence {
    /// The next tighter level. `Power` is already the tightest.
    pub fn next(self) -> Self {
        match self {
            Precedence::AddSub => Precedence::MulDiv,
            Precedence::MulDiv => Precedence::Power,
            Precedence::Power => Precedence::Power,
        }
    }
}

impl Operator {
    /// The operator's symbol, also used as its `computed_function_name`.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Percent => "%",
            Operator::Power => "^",
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '%' => Some(Operator::Percent),
            '^' => Some(Operator::Power),
            _ => None,
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            Operator::Add | Operator::Subtract => Precedence::AddSub,
            Operator::Multiply | Operator::Divide | Operator::Percent => Precedence::MulDiv,
            Operator::Power => Precedence::Power,
        }
    }

    /// `^` groups to the right; everything else groups to the left.
    pub fn is_right_associative(self) -> bool {
        matches!(self, Operator::Power)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Either a registry function or a binary operator: whatever produced a
/// computed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionRef {
    Function(ComputedFunction),
    Operator(Operator),
}

impl FunctionRef {
    /// The `computed_function_name` for configs produced by this function.
    pub fn name(self) -> &'static str {
        match self {
            FunctionRef::Function(function) => function.name(),
            FunctionRef::Operator(operator) => operator.symbol(),
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            FunctionRef::Function(function) => function.arity(),
            FunctionRef::Operator(_) => Arity::Exactly(2),
        }
    }

    /// Resolve a `computed_function_name` back to a function or operator.
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(function) = ComputedFunction::from_name(name) {
            return Some(FunctionRef::Function(function));
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Operator::from_char(ch).map(FunctionRef::Operator),
            _ => None,
        }
    }
}

impl From<ComputedFunction> for FunctionRef {
    fn from(function: ComputedFunction) -> Self {
        FunctionRef::Function(function)
    }
}

impl From<Operator> for FunctionRef {
    fn from(operator: Operator) -> Self {
        FunctionRef::Operator(operator)
    }
}

impl fmt::Display for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_names_round_trip() {
        for function in ComputedFunction::all() {
            assert_eq!(ComputedFunction::from_name(function.name()), Some(*function));
        }
    }

    #[test]
    fn test_function_lookup_is_case_sensitive() {
        assert_eq!(ComputedFunction::from_name("sqrt"), Some(ComputedFunction::Sqrt));
        assert_eq!(ComputedFunction::from_name("SQRT"), None);
        assert_eq!(ComputedFunction::from_name("sqrt2"), None);
    }

    #[test]
    fn test_arity() {
        assert!(ComputedFunction::Sqrt.arity().accepts(1));
        assert!(!ComputedFunction::Sqrt.arity().accepts(2));
        assert!(ComputedFunction::ConcatComma.arity().accepts(3));
        assert!(!ComputedFunction::ConcatSpace.arity().accepts(1));
        assert_eq!(Arity::Exactly(1).to_string(), "exactly 1 argument");
        assert_eq!(Arity::AtLeast(2).to_string(), "at least 2 arguments");
    }

    #[test]
    fn test_operator_precedence() {
        assert!(Operator::Power.precedence() > Operator::Divide.precedence());
        assert!(Operator::Multiply.precedence() > Operator::Add.precedence());
        assert_eq!(Operator::Percent.precedence(), Operator::Divide.precedence());
        assert!(Operator::Power.is_right_associative());
        assert!(!Operator::Subtract.is_right_associative());
        assert_eq!(Precedence::AddSub.next(), Precedence::MulDiv);
        assert_eq!(Precedence::Power.next(), Precedence::Power);
    }

    #[test]
    fn test_function_ref_from_name() {
        assert_eq!(
            FunctionRef::from_name("day_of_week"),
            Some(FunctionRef::Function(ComputedFunction::DayOfWeek))
        );
        assert_eq!(FunctionRef::from_name("^"), Some(FunctionRef::Operator(Operator::Power)));
        assert_eq!(FunctionRef::from_name("x^2"), None);
        assert_eq!(FunctionRef::from_name(""), None);
    }

    #[test]
    fn test_categories() {
        assert_eq!(ComputedFunction::Pow2.category(), FunctionCategory::Numeric);
        assert_eq!(ComputedFunction::ConcatSpace.category(), FunctionCategory::String);
        assert_eq!(ComputedFunction::WeekBucket.category(), FunctionCategory::Datetime);
    }
}
