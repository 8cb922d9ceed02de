//! Persisted computed-column state
//!
//! A viewer saves its computed columns as two lists side by side: the
//! expressions the user typed (`computed-columns`) and the config list they
//! compiled to (`parsed-computed-columns`). This module loads, validates and
//! re-creates that pair.
//!
//! # Main Types
//!
//! - [`ComputedColumnSet`] - Expressions plus their compiled configs

pub mod column_set;

pub use column_set::ComputedColumnSet;
