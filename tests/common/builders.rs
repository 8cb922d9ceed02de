//! Test data builders for creating expression strings

/// Builder for expression source text
///
/// Keeps quoting and parenthesization out of the test bodies.
#[derive(Debug, Clone)]
pub struct ExprBuilder {
    text: String,
}

impl ExprBuilder {
    /// A quoted column reference
    pub fn column(name: &str) -> Self {
        Self {
            text: format!("\"{}\"", name),
        }
    }

    /// Wrap in a function call
    pub fn call(self, function: &str) -> Self {
        Self {
            text: format!("{}({})", function, self.text),
        }
    }

    /// Function call with several arguments
    pub fn call_many(function: &str, args: &[ExprBuilder]) -> Self {
        let args: Vec<&str> = args.iter().map(|a| a.text.as_str()).collect();
        Self {
            text: format!("{}({})", function, args.join(", ")),
        }
    }

    /// Binary operation without grouping
    pub fn op(self, operator: char, right: ExprBuilder) -> Self {
        Self {
            text: format!("{} {} {}", self.text, operator, right.text),
        }
    }

    /// Wrap in parentheses
    pub fn group(self) -> Self {
        Self {
            text: format!("({})", self.text),
        }
    }

    /// Append `AS "name"`
    pub fn alias(self, name: &str) -> Self {
        Self {
            text: format!("{} AS \"{}\"", self.text, name),
        }
    }

    pub fn build(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_builder() {
        let expr = ExprBuilder::column("a")
            .call("sqrt")
            .op('+', ExprBuilder::column("b"))
            .alias("total")
            .build();

        assert_eq!(expr, r#"sqrt("a") + "b" AS "total""#);
    }
}
