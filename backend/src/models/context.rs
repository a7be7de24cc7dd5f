//! Autofunding execution context
//!
//! The context is the caller-supplied snapshot a rule pass runs against:
//! the unassigned cash pool, the optional new-income amount that triggered
//! the pass, and the envelope balances. The executor never mutates the
//! context itself; the shrinking pool is tracked separately so envelope
//! balances stay a point-in-time snapshot for every rule.
//!
//! CRITICAL: All money values are i64 (minor units)

use serde::{Deserialize, Serialize};

use super::envelope::EnvelopeTarget;

/// Snapshot state for one autofunding pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationContext {
    /// Not-yet-allocated cash the rules draw down (i64 minor units)
    pub unassigned_cash_minor: i64,

    /// Income amount that triggered this pass, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_income_amount_minor: Option<i64>,

    /// Envelope balances as of the start of the pass
    #[serde(default)]
    pub envelopes: Vec<EnvelopeTarget>,
}

impl AllocationContext {
    /// Create a context with a cash pool and envelopes.
    pub fn new(unassigned_cash_minor: i64, envelopes: Vec<EnvelopeTarget>) -> Self {
        Self {
            unassigned_cash_minor,
            new_income_amount_minor: None,
            envelopes,
        }
    }

    /// Set the new-income amount.
    pub fn with_new_income(mut self, amount_minor: i64) -> Self {
        self.new_income_amount_minor = Some(amount_minor);
        self
    }

    /// Look up an envelope by id.
    pub fn find_envelope(&self, id: &str) -> Option<&EnvelopeTarget> {
        self.envelopes.iter().find(|e| e.id == id)
    }
}
