//! Paycheck allocation strategies
//!
//! A strategy splits one paycheck (i64 minor units) across the supplied
//! envelopes and returns a full allocation list. All strategies are total
//! functions: they never error, and their output always sums exactly to the
//! paycheck (the zero-sum invariant).
//!
//! Available strategies:
//! 1. **EvenSplit**: proportional to frequency-scaled monthly targets
//! 2. **LastSplit**: repeat the previous paycheck's split, rescaled
//! 3. **TargetFirst**: fill urgent targets before spreading the rest
//!
//! Fractional minor units dropped by proportional division are redistributed
//! by the largest-remainder dust pass in [`dust`].

use serde::{Deserialize, Serialize};

use crate::models::{AllocationItem, EnvelopeTarget, Frequency, PreviousAllocation};

pub mod dust;
mod even_split;
mod last_split;
mod target_first;

pub use dust::{apportion, distribute_dust, equal_shares};

/// Allocation strategy selector.
///
/// An unrecognized strategy name is a caller-side validation failure: it
/// simply fails to deserialize, before the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    EvenSplit,
    LastSplit,
    TargetFirst,
}

impl Strategy {
    /// Wire-format name of the strategy.
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::EvenSplit => "even_split",
            Strategy::LastSplit => "last_split",
            Strategy::TargetFirst => "target_first",
        }
    }
}

/// Run one allocation strategy over a paycheck.
///
/// `previous_allocation` is only read by [`Strategy::LastSplit`];
/// `frequency` only by [`Strategy::EvenSplit`].
///
/// # Example
/// ```
/// use envelope_funding_core_rs::models::EnvelopeTarget;
/// use envelope_funding_core_rs::strategy::{allocate, Strategy};
///
/// let envelopes = vec![
///     EnvelopeTarget::new("rent", 100_000),
///     EnvelopeTarget::new("groceries", 50_000),
/// ];
/// let allocations = allocate(Strategy::EvenSplit, 75_000, &envelopes, None, None);
/// let total: i64 = allocations.iter().map(|a| a.amount_minor).sum();
/// assert_eq!(total, 75_000);
/// ```
pub fn allocate(
    strategy: Strategy,
    paycheck_minor: i64,
    envelopes: &[EnvelopeTarget],
    previous_allocation: Option<&[PreviousAllocation]>,
    frequency: Option<Frequency>,
) -> Vec<AllocationItem> {
    match strategy {
        Strategy::EvenSplit => even_split::allocate(paycheck_minor, envelopes, frequency),
        Strategy::LastSplit => {
            last_split::allocate(paycheck_minor, envelopes, previous_allocation.unwrap_or(&[]))
        }
        Strategy::TargetFirst => target_first::allocate(paycheck_minor, envelopes),
    }
}
