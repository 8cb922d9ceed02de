//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use colexpr::ComputedColumnConfig;
use std::collections::HashSet;

/// Shorthand for an expected config
pub fn config(column: &str, function: &str, inputs: &[&str]) -> ComputedColumnConfig {
    ComputedColumnConfig::new(
        column,
        function,
        inputs.iter().map(|s| s.to_string()).collect(),
    )
}

/// Column names of a config list, in order
pub fn columns(configs: &[ComputedColumnConfig]) -> Vec<&str> {
    configs.iter().map(|c| c.column.as_str()).collect()
}

/// Assert every input is either a data column or generated earlier in the list
pub fn assert_dependency_order(configs: &[ComputedColumnConfig]) {
    let generated: HashSet<&str> = configs.iter().map(|c| c.column.as_str()).collect();
    let mut seen = HashSet::new();

    for config in configs {
        for input in &config.inputs {
            assert!(
                !generated.contains(input.as_str()) || seen.contains(input.as_str()),
                "Input {:?} of {:?} is used before it is generated",
                input,
                config.column
            );
        }
        seen.insert(config.column.as_str());
    }
}
