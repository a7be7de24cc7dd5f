//! Even-split allocation
//!
//! Splits a paycheck proportionally to each envelope's monthly target,
//! optionally scaled down to the paycheck frequency. Envelopes with no
//! targets at all fall back to an equal split.

use crate::models::{AllocationItem, EnvelopeTarget, Frequency};

use super::dust::{apportion, equal_shares};

const REASON_WEIGHTED: &str = "weighted by monthly target";
const REASON_EQUAL: &str = "equal share across envelopes";

/// Split `paycheck_minor` across `envelopes` by frequency-scaled targets.
///
/// Total functions: every input yields a full allocation summing exactly to
/// the paycheck (empty envelope list yields an empty one).
pub fn allocate(
    paycheck_minor: i64,
    envelopes: &[EnvelopeTarget],
    frequency: Option<Frequency>,
) -> Vec<AllocationItem> {
    if envelopes.is_empty() {
        return Vec::new();
    }

    let weights: Vec<i64> = envelopes
        .iter()
        .map(|e| match frequency {
            Some(f) => f.scale_target(e.monthly_target_minor),
            None => e.monthly_target_minor,
        })
        .collect();

    let total_weight: i128 = weights.iter().map(|&w| i128::from(w.max(0))).sum();
    let (amounts, reason) = if total_weight == 0 {
        (equal_shares(paycheck_minor, envelopes.len()), REASON_EQUAL)
    } else {
        (apportion(paycheck_minor, &weights), REASON_WEIGHTED)
    };

    envelopes
        .iter()
        .zip(amounts)
        .map(|(envelope, amount_minor)| AllocationItem::new(envelope.id.as_str(), amount_minor, reason))
        .collect()
}
