//! Envelope target model
//!
//! An envelope is a named budget bucket with a current balance and an
//! optional monthly funding target. Envelopes are read-only inputs to the
//! engine: strategies and rules read them, nothing ever mutates them.
//!
//! CRITICAL: All money values are i64 (minor units)

use serde::{Deserialize, Serialize};

/// Category name that sorts first in the target-first funding order.
pub const BILLS_CATEGORY: &str = "bills";

/// Pay frequency used to scale monthly targets down to one paycheck's worth.
///
/// Scaling is integer-only and rounds toward fairness: a weekly paycheck
/// covers a quarter of the month, a biweekly paycheck half of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    /// Scale a monthly target to this frequency's share of the month.
    ///
    /// # Example
    /// ```
    /// use envelope_funding_core_rs::models::Frequency;
    ///
    /// assert_eq!(Frequency::Weekly.scale_target(100_000), 25_000);
    /// assert_eq!(Frequency::Biweekly.scale_target(100_001), 50_001);
    /// assert_eq!(Frequency::Monthly.scale_target(100_000), 100_000);
    /// ```
    pub fn scale_target(self, monthly_target_minor: i64) -> i64 {
        match self {
            Frequency::Weekly => (monthly_target_minor + 2) / 4,
            Frequency::Biweekly => (monthly_target_minor + 1) / 2,
            Frequency::Monthly => monthly_target_minor,
        }
    }
}

/// A budget envelope as supplied by the caller.
///
/// # Example
/// ```
/// use envelope_funding_core_rs::models::EnvelopeTarget;
///
/// let rent = EnvelopeTarget::new("rent", 100_000) // $1,000.00 monthly target
///     .with_category("bills")
///     .with_priority(1);
/// assert_eq!(rent.shortfall_minor(), 100_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeTarget {
    /// Unique envelope identifier
    pub id: String,

    /// Monthly funding target (i64 minor units, >= 0)
    pub monthly_target_minor: i64,

    /// Current balance (i64 minor units, >= 0)
    #[serde(default)]
    pub current_balance_minor: i64,

    /// Optional category; `"bills"` envelopes fund first under target-first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Optional urgency rank (lower = more urgent); unset ranks last
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl EnvelopeTarget {
    /// Create an envelope with a monthly target and a zero balance.
    pub fn new(id: impl Into<String>, monthly_target_minor: i64) -> Self {
        Self {
            id: id.into(),
            monthly_target_minor,
            current_balance_minor: 0,
            category: None,
            priority: None,
        }
    }

    /// Set the current balance.
    pub fn with_balance(mut self, current_balance_minor: i64) -> Self {
        self.current_balance_minor = current_balance_minor;
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the urgency rank.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Amount still needed to reach the monthly target (never negative).
    pub fn shortfall_minor(&self) -> i64 {
        (self.monthly_target_minor - self.current_balance_minor).max(0)
    }

    /// Whether this envelope belongs to the bills category.
    pub fn is_bills(&self) -> bool {
        self.category.as_deref() == Some(BILLS_CATEGORY)
    }
}
