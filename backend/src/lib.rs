//! Envelope Funding Core - Rust Engine
//!
//! Deterministic fund-distribution engine: splits paychecks across budget
//! envelopes under a chosen strategy, and distributes an unassigned cash
//! pool through an ordered autofunding rule pipeline.
//!
//! # Architecture
//!
//! - **models**: Domain types (EnvelopeTarget, Rule, Condition, contexts)
//! - **strategy**: Paycheck allocation strategies + largest-remainder dust
//! - **rules**: Autofunding executor, condition evaluation, validation
//! - **api**: Request/response shapes and entry points for the host layer
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (minor units); proportional math uses i128
//!    intermediates, never floats
//! 2. Zero-sum: a strategy's allocations sum exactly to the paycheck
//! 3. Pool conservation: a rule pass never allocates more than the pool it
//!    started with, and no rule exceeds what remains when it runs
//! 4. Determinism: identical inputs yield identical outputs; all
//!    tie-breaking is integer-ordered and stable

// Module declarations
pub mod api;
pub mod models;
pub mod rules;
pub mod strategy;

// Re-exports for convenience
pub use api::{
    plan_warnings, run_allocation, run_autofunding, AllocationRequest, AllocationResult,
    AutofundingRequest, AutofundingResponse, ExecutionRecord, PlanWarning,
    RequestValidationError,
};
pub use models::{
    AllocationContext, AllocationItem, Condition, ConditionKind, EnvelopeTarget, Frequency,
    PreviousAllocation, Rule, RuleAllocation, RuleConfig, RuleKind, SourceKind,
};
pub use rules::{
    evaluate_condition, evaluate_conditions, execute_rules, validate_rules, RulePassOutcome,
    RuleValidationError,
};
pub use strategy::{allocate, apportion, distribute_dust, equal_shares, Strategy};
