//! Execution records and plan warnings
//!
//! The engine persists nothing; these are plain values a caller may store or
//! display. The fingerprint makes the determinism guarantee auditable:
//! identical inputs produce identical allocation sequences, so their
//! fingerprints match across hosts and runs.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::AutofundingResponse;

/// Summary of one autofunding pass, suitable for a caller-kept history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecord {
    /// Sum of all allocation amounts
    pub total_allocated_minor: i64,

    /// Pool left after the pass
    pub remaining_minor: i64,

    /// Enabled rules evaluated
    pub rules_executed: usize,

    /// Number of allocation records produced
    pub allocation_count: usize,

    /// SHA-256 over the allocation sequence (rule id, envelope id, amount)
    pub fingerprint: String,
}

impl ExecutionRecord {
    /// Build a record from a pass response.
    pub fn from_response(response: &AutofundingResponse) -> Self {
        let mut hasher = Sha256::new();
        for allocation in &response.allocations {
            hasher.update(allocation.rule_id.as_bytes());
            hasher.update([0u8]);
            hasher.update(allocation.envelope_id.as_bytes());
            hasher.update([0u8]);
            hasher.update(allocation.amount_minor.to_le_bytes());
        }

        Self {
            total_allocated_minor: response.total_allocated_minor,
            remaining_minor: response.remaining_minor,
            rules_executed: response.rules_executed,
            allocation_count: response.allocations.len(),
            fingerprint: format!("{:x}", hasher.finalize()),
        }
    }
}

/// Advisory findings about a pass, for display alongside the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanWarning {
    /// The pool ran dry while enabled rules still wanted funds
    InsufficientFunds,

    /// No rule produced a positive allocation
    NoExecution,

    /// Less than 5% of the initial pool remains unassigned
    LowRemainingCash { remaining_minor: i64 },
}

/// Derive warnings from a pass response and the pool it started with.
pub fn plan_warnings(response: &AutofundingResponse, initial_pool_minor: i64) -> Vec<PlanWarning> {
    let mut warnings = Vec::new();

    let starved = response.remaining_minor == 0
        && response
            .allocations
            .iter()
            .any(|a| a.amount_minor == 0);
    if starved {
        warnings.push(PlanWarning::InsufficientFunds);
    }

    if response.total_allocated_minor == 0 && response.rules_executed > 0 {
        warnings.push(PlanWarning::NoExecution);
    }

    // Integer form of "below 5% of the initial pool"
    if response.remaining_minor > 0 && response.remaining_minor * 20 < initial_pool_minor {
        warnings.push(PlanWarning::LowRemainingCash {
            remaining_minor: response.remaining_minor,
        });
    }

    warnings
}
