//! Allocation output records
//!
//! One record per funded envelope. Strategy output carries a human-readable
//! reason; autofunding output additionally attributes each record to the
//! rule that produced it.
//!
//! CRITICAL: All money values are i64 (minor units)

use serde::{Deserialize, Serialize};

/// One funded envelope in a strategy result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationItem {
    /// Envelope receiving the funds
    pub envelope_id: String,

    /// Amount credited (i64 minor units)
    pub amount_minor: i64,

    /// Why this envelope received this amount
    pub reason: String,
}

impl AllocationItem {
    pub fn new(envelope_id: impl Into<String>, amount_minor: i64, reason: &str) -> Self {
        Self {
            envelope_id: envelope_id.into(),
            amount_minor,
            reason: reason.to_string(),
        }
    }
}

/// A prior paycheck's allocation line, input to the last-split strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousAllocation {
    pub envelope_id: String,
    pub amount_minor: i64,
}

impl PreviousAllocation {
    pub fn new(envelope_id: impl Into<String>, amount_minor: i64) -> Self {
        Self {
            envelope_id: envelope_id.into(),
            amount_minor,
        }
    }
}

/// One funded envelope in an autofunding pass, attributed to its rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleAllocation {
    /// Envelope receiving the funds
    pub envelope_id: String,

    /// Amount credited (i64 minor units)
    pub amount_minor: i64,

    /// Why this envelope received this amount
    pub reason: String,

    /// Rule that produced this record
    pub rule_id: String,
}
