//! External interface shapes and entry points
//!
//! The surrounding HTTP layer handles methods, CORS, decoding, and field
//! limits; what reaches this module is already-shaped data. Both entry
//! points are pure over their inputs (one invocation touches nothing but
//! its own stack), so a host may run any number of them concurrently.
//!
//! Wire format is camelCase throughout, matching the JSON the rest of the
//! system speaks.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    AllocationContext, AllocationItem, EnvelopeTarget, Frequency, PreviousAllocation, Rule,
    RuleAllocation,
};
use crate::rules::execute_rules;
use crate::strategy::{self, Strategy};

pub mod record;

pub use record::{plan_warnings, ExecutionRecord, PlanWarning};

/// One paycheck allocation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    /// Which strategy to run
    pub strategy: Strategy,

    /// Paycheck amount (i64 minor units, > 0)
    pub paycheck_amount_minor: i64,

    /// Envelopes to allocate across
    pub envelopes: Vec<EnvelopeTarget>,

    /// Prior paycheck's split, read by last_split only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_allocation: Option<Vec<PreviousAllocation>>,

    /// Pay frequency, read by even_split only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
}

/// Result of one paycheck allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    /// One record per funded envelope
    pub allocations: Vec<AllocationItem>,

    /// Sum of all allocation amounts
    pub total_allocated_minor: i64,

    /// Paycheck minus total; zero for these strategies
    pub remaining_minor: i64,

    /// Strategy that produced this result
    pub strategy: Strategy,

    /// Wall-clock duration of the computation (informational)
    pub execution_time_ms: u64,
}

/// One autofunding pass request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofundingRequest {
    /// Rules to run, in any order; the engine sorts by priority
    pub rules: Vec<Rule>,

    /// Pool, optional new income, and envelope snapshot
    pub context: AllocationContext,
}

/// Result of one autofunding pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofundingResponse {
    /// Produced allocations in rule execution order
    pub allocations: Vec<RuleAllocation>,

    /// Sum of all allocation amounts
    pub total_allocated_minor: i64,

    /// Pool left after the pass
    pub remaining_minor: i64,

    /// Wall-clock duration of the computation (informational)
    pub execution_time_ms: u64,

    /// Enabled rules evaluated, including zero-allocation ones
    pub rules_executed: usize,
}

/// Failures surfaced by request pre-validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestValidationError {
    #[error("paycheck amount must be positive, got {0}")]
    NonPositivePaycheck(i64),

    #[error("unassigned cash must be non-negative, got {0}")]
    NegativeUnassignedCash(i64),

    #[error("envelope {id}: monthly target must be non-negative")]
    NegativeTarget { id: String },

    #[error("envelope {id}: current balance must be non-negative")]
    NegativeBalance { id: String },
}

impl AllocationRequest {
    /// Check the request's numeric preconditions.
    pub fn validate(&self) -> Result<(), Vec<RequestValidationError>> {
        let mut errors = Vec::new();
        if self.paycheck_amount_minor <= 0 {
            errors.push(RequestValidationError::NonPositivePaycheck(
                self.paycheck_amount_minor,
            ));
        }
        validate_envelopes(&self.envelopes, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl AutofundingRequest {
    /// Check the request's numeric preconditions.
    pub fn validate(&self) -> Result<(), Vec<RequestValidationError>> {
        let mut errors = Vec::new();
        if self.context.unassigned_cash_minor < 0 {
            errors.push(RequestValidationError::NegativeUnassignedCash(
                self.context.unassigned_cash_minor,
            ));
        }
        validate_envelopes(&self.context.envelopes, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn validate_envelopes(envelopes: &[EnvelopeTarget], errors: &mut Vec<RequestValidationError>) {
    for envelope in envelopes {
        if envelope.monthly_target_minor < 0 {
            errors.push(RequestValidationError::NegativeTarget {
                id: envelope.id.clone(),
            });
        }
        if envelope.current_balance_minor < 0 {
            errors.push(RequestValidationError::NegativeBalance {
                id: envelope.id.clone(),
            });
        }
    }
}

/// Run one paycheck allocation.
///
/// # Example
/// ```
/// use envelope_funding_core_rs::api::{run_allocation, AllocationRequest};
/// use envelope_funding_core_rs::models::EnvelopeTarget;
/// use envelope_funding_core_rs::strategy::Strategy;
///
/// let request = AllocationRequest {
///     strategy: Strategy::EvenSplit,
///     paycheck_amount_minor: 250_000,
///     envelopes: vec![
///         EnvelopeTarget::new("rent", 100_000),
///         EnvelopeTarget::new("groceries", 50_000),
///         EnvelopeTarget::new("savings", 100_000),
///     ],
///     previous_allocation: None,
///     frequency: None,
/// };
///
/// let result = run_allocation(&request);
/// assert_eq!(result.total_allocated_minor, 250_000);
/// assert_eq!(result.remaining_minor, 0);
/// ```
pub fn run_allocation(request: &AllocationRequest) -> AllocationResult {
    let started = Instant::now();

    let allocations = strategy::allocate(
        request.strategy,
        request.paycheck_amount_minor,
        &request.envelopes,
        request.previous_allocation.as_deref(),
        request.frequency,
    );
    let total_allocated_minor: i64 = allocations.iter().map(|a| a.amount_minor).sum();

    AllocationResult {
        allocations,
        total_allocated_minor,
        remaining_minor: request.paycheck_amount_minor - total_allocated_minor,
        strategy: request.strategy,
        execution_time_ms: started.elapsed().as_millis() as u64,
    }
}

/// Run one autofunding pass.
pub fn run_autofunding(request: &AutofundingRequest) -> AutofundingResponse {
    let started = Instant::now();

    let outcome = execute_rules(&request.rules, &request.context);
    let total_allocated_minor: i64 = outcome.allocations.iter().map(|a| a.amount_minor).sum();

    AutofundingResponse {
        allocations: outcome.allocations,
        total_allocated_minor,
        remaining_minor: outcome.remaining_minor,
        execution_time_ms: started.elapsed().as_millis() as u64,
        rules_executed: outcome.rules_executed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_request_validation() {
        let request = AllocationRequest {
            strategy: Strategy::EvenSplit,
            paycheck_amount_minor: 0,
            envelopes: vec![EnvelopeTarget::new("rent", -5)],
            previous_allocation: None,
            frequency: None,
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_autofunding_request_validation() {
        let request = AutofundingRequest {
            rules: vec![],
            context: AllocationContext::new(-1, vec![]),
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![RequestValidationError::NegativeUnassignedCash(-1)]
        );
    }

    #[test]
    fn test_allocation_result_wire_format() {
        let request = AllocationRequest {
            strategy: Strategy::TargetFirst,
            paycheck_amount_minor: 1_000,
            envelopes: vec![EnvelopeTarget::new("rent", 1_000)],
            previous_allocation: None,
            frequency: None,
        };

        let json = serde_json::to_value(run_allocation(&request)).unwrap();
        assert_eq!(json["strategy"], "target_first");
        assert_eq!(json["totalAllocatedMinor"], 1_000);
        assert_eq!(json["remainingMinor"], 0);
    }
}
