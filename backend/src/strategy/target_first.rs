//! Target-first allocation
//!
//! Funds envelopes in urgency order (bills before everything else, then by
//! ascending priority, then by id), topping each up to its monthly target
//! until the paycheck runs out. Whatever is left after every target is
//! satisfied spreads evenly over the same order.

use std::cmp::Ordering;

use crate::models::{AllocationItem, EnvelopeTarget};

use super::dust::equal_shares;

const REASON_TARGET: &str = "toward monthly target";
const REASON_SURPLUS: &str = "even share of surplus";
const REASON_TARGET_AND_SURPLUS: &str = "monthly target plus surplus share";

/// Fund `envelopes` in urgency order up to their targets.
pub fn allocate(paycheck_minor: i64, envelopes: &[EnvelopeTarget]) -> Vec<AllocationItem> {
    if envelopes.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<&EnvelopeTarget> = envelopes.iter().collect();
    order.sort_by(|a, b| funding_order(a, b));

    let mut remaining = paycheck_minor;
    let mut target_amounts = vec![0i64; order.len()];
    for (slot, envelope) in order.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        let grant = envelope.shortfall_minor().min(remaining);
        target_amounts[slot] = grant;
        remaining -= grant;
    }

    // Remaining is nonzero only when every shortfall above was satisfied.
    let surplus_amounts = if remaining > 0 {
        equal_shares(remaining, order.len())
    } else {
        vec![0; order.len()]
    };

    order
        .iter()
        .zip(target_amounts.iter().zip(&surplus_amounts))
        .map(|(envelope, (&target, &surplus))| {
            let reason = match (target > 0, surplus > 0) {
                (true, true) => REASON_TARGET_AND_SURPLUS,
                (false, true) => REASON_SURPLUS,
                _ => REASON_TARGET,
            };
            AllocationItem::new(envelope.id.as_str(), target + surplus, reason)
        })
        .collect()
}

/// Bills first, then ascending priority (unset ranks last), then id.
fn funding_order(a: &EnvelopeTarget, b: &EnvelopeTarget) -> Ordering {
    b.is_bills()
        .cmp(&a.is_bills())
        .then_with(|| sort_priority(a).cmp(&sort_priority(b)))
        .then_with(|| a.id.cmp(&b.id))
}

fn sort_priority(envelope: &EnvelopeTarget) -> i64 {
    envelope.priority.unwrap_or(i64::MAX)
}
