//! Condition evaluation for conditional rules
//!
//! Each condition is a single strict comparison against the pass state:
//! either an envelope balance from the snapshot, or the unassigned cash
//! pool at its current (post-prior-rule) value.
//!
//! Two deliberate asymmetries in the contract:
//! - a balance condition whose envelope cannot be resolved is **false**,
//!   regardless of comparison direction;
//! - an unrecognized condition kind is **satisfied**, so rule payloads from
//!   newer clients degrade to plain fixed transfers instead of dead rules.

use crate::models::{Condition, ConditionKind, EnvelopeTarget};

/// Evaluate one condition against the current pass state.
///
/// `unassigned_cash_minor` is the pool as already drawn down by prior rules,
/// not the value the pass started with.
pub fn evaluate_condition(
    condition: &Condition,
    envelopes: &[EnvelopeTarget],
    unassigned_cash_minor: i64,
) -> bool {
    match condition.kind {
        ConditionKind::BalanceLessThan => {
            balance_of(condition, envelopes).is_some_and(|b| b < condition.value_minor)
        }
        ConditionKind::BalanceGreaterThan => {
            balance_of(condition, envelopes).is_some_and(|b| b > condition.value_minor)
        }
        ConditionKind::UnassignedGreaterThan => unassigned_cash_minor > condition.value_minor,
        ConditionKind::UnassignedLessThan => unassigned_cash_minor < condition.value_minor,
        ConditionKind::Unknown => true,
    }
}

/// Evaluate a conjunction of conditions; an empty list is trivially satisfied.
pub fn evaluate_conditions(
    conditions: &[Condition],
    envelopes: &[EnvelopeTarget],
    unassigned_cash_minor: i64,
) -> bool {
    conditions
        .iter()
        .all(|c| evaluate_condition(c, envelopes, unassigned_cash_minor))
}

fn balance_of(condition: &Condition, envelopes: &[EnvelopeTarget]) -> Option<i64> {
    let id = condition.envelope_id.as_deref()?;
    envelopes
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.current_balance_minor)
}
