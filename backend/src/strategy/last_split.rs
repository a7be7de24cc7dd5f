//! Last-split allocation
//!
//! Repeats the previous paycheck's split, scaled to the new amount. With no
//! usable history the strategy degrades to an even split.

use crate::models::{AllocationItem, EnvelopeTarget, PreviousAllocation};

use super::dust::apportion;
use super::even_split;

const REASON_SCALED: &str = "scaled from previous paycheck";

/// Scale `previous` to `paycheck_minor`, preserving the prior items' order
/// and envelope identities.
///
/// An absent or zero-sum previous allocation delegates to the even split
/// with no frequency adjustment.
pub fn allocate(
    paycheck_minor: i64,
    envelopes: &[EnvelopeTarget],
    previous: &[PreviousAllocation],
) -> Vec<AllocationItem> {
    let previous_total: i64 = previous.iter().map(|p| p.amount_minor).sum();
    if previous.is_empty() || previous_total == 0 {
        return even_split::allocate(paycheck_minor, envelopes, None);
    }

    let weights: Vec<i64> = previous.iter().map(|p| p.amount_minor).collect();
    let amounts = apportion(paycheck_minor, &weights);

    previous
        .iter()
        .zip(amounts)
        .map(|(prior, amount_minor)| {
            AllocationItem::new(prior.envelope_id.as_str(), amount_minor, REASON_SCALED)
        })
        .collect()
}
