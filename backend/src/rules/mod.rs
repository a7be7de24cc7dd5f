//! Autofunding rule pipeline
//!
//! Distributes the unassigned cash pool across an ordered list of rules.
//!
//! - [`executor`]: the sequential pass over the shrinking pool
//! - [`conditions`]: predicate evaluation for conditional rules
//! - [`validation`]: caller-side pre-checks for strict callers

pub mod conditions;
pub mod executor;
pub mod validation;

pub use conditions::{evaluate_condition, evaluate_conditions};
pub use executor::{execute_rules, RulePassOutcome};
pub use validation::{validate_rules, RuleValidationError};
