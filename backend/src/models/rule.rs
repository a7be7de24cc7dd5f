//! Autofunding rule model
//!
//! A rule describes one step of the autofunding pipeline: what kind of
//! transfer to make, where the money goes, and (for conditional rules) the
//! predicates gating it. Rules are plain data deserialized from the caller's
//! payload; dispatch on [`RuleKind`] is exhaustively matched at compile time.
//!
//! Rule payloads are forward compatible: kinds and condition kinds this
//! engine does not understand deserialize to `Unknown` instead of failing,
//! and the executor skips them.
//!
//! CRITICAL: All money values are i64 (minor units)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of transfer a rule performs.
///
/// Deserialization never fails on the tag: kinds this engine does not
/// recognize become [`RuleKind::Unknown`] and the executor skips them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum RuleKind {
    /// Move a fixed amount to one envelope ("Move $200 to Rent")
    FixedAmount,

    /// Move a percentage of a base amount ("Move 30% to Savings")
    Percentage,

    /// Top one envelope up to its monthly target before anything else
    PriorityFill,

    /// Split whatever is left across several envelopes
    SplitRemainder,

    /// Fixed transfer gated on conditions ("If balance < $50, move $100")
    Conditional,

    /// Any kind this engine does not recognize; skipped by the executor
    Unknown,
}

impl From<String> for RuleKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "fixed_amount" => RuleKind::FixedAmount,
            "percentage" => RuleKind::Percentage,
            "priority_fill" => RuleKind::PriorityFill,
            "split_remainder" => RuleKind::SplitRemainder,
            "conditional" => RuleKind::Conditional,
            _ => RuleKind::Unknown,
        }
    }
}

/// Base amount a percentage rule draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum SourceKind {
    /// The unassigned cash pool at its current (post-prior-rule) value
    Unassigned,

    /// The new income amount that triggered this pass
    Income,

    /// Any source this engine does not recognize; treated as unassigned
    Unknown,
}

impl From<String> for SourceKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "unassigned" => SourceKind::Unassigned,
            "income" => SourceKind::Income,
            _ => SourceKind::Unknown,
        }
    }
}

/// Per-rule configuration. Which fields matter depends on [`RuleKind`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    /// Base for percentage rules; unset or unrecognized means unassigned cash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceKind>,

    /// Target envelope for single-envelope rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,

    /// Target envelopes for split_remainder rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_ids: Vec<String>,

    /// Transfer amount for fixed_amount and conditional rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_minor: Option<i64>,

    /// Percentage (0-100) for percentage rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,

    /// Predicates for conditional rules, AND-combined
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// One autofunding rule.
///
/// # Example
/// ```
/// use envelope_funding_core_rs::models::{Rule, RuleKind};
///
/// let rule = Rule::new(RuleKind::FixedAmount, 1)
///     .with_target("rent")
///     .with_amount(20_000); // $200.00
/// assert!(rule.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Unique rule identifier
    pub id: String,

    /// Transfer kind; dispatch key for the executor
    #[serde(rename = "type")]
    pub kind: RuleKind,

    /// Execution order (lower runs first; ties keep input order)
    pub priority: i64,

    /// Disabled rules produce no allocation and have no side effect
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Kind-specific configuration
    #[serde(default)]
    pub config: RuleConfig,
}

fn default_enabled() -> bool {
    true
}

impl Rule {
    /// Create an enabled rule with a generated id.
    pub fn new(kind: RuleKind, priority: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            priority,
            enabled: true,
            config: RuleConfig::default(),
        }
    }

    /// Replace the generated id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the single target envelope.
    pub fn with_target(mut self, target_id: impl Into<String>) -> Self {
        self.config.target_id = Some(target_id.into());
        self
    }

    /// Set the split target envelopes.
    pub fn with_targets<I, S>(mut self, target_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.target_ids = target_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set the transfer amount.
    pub fn with_amount(mut self, amount_minor: i64) -> Self {
        self.config.amount_minor = Some(amount_minor);
        self
    }

    /// Set the percentage.
    pub fn with_percentage(mut self, percentage: f64) -> Self {
        self.config.percentage = Some(percentage);
        self
    }

    /// Set the percentage base.
    pub fn with_source(mut self, source: SourceKind) -> Self {
        self.config.source_type = Some(source);
        self
    }

    /// Add a gating condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.config.conditions.push(condition);
        self
    }

    /// Disable the rule.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Predicate kinds for conditional rules.
///
/// All comparisons are strict: boundary equality never satisfies a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ConditionKind {
    /// Envelope balance strictly below the value
    BalanceLessThan,

    /// Envelope balance strictly above the value
    BalanceGreaterThan,

    /// Unassigned cash strictly above the value
    UnassignedGreaterThan,

    /// Unassigned cash strictly below the value
    UnassignedLessThan,

    /// Any kind this engine does not recognize; satisfied by contract
    Unknown,
}

impl From<String> for ConditionKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "balance_less_than" => ConditionKind::BalanceLessThan,
            "balance_greater_than" => ConditionKind::BalanceGreaterThan,
            "unassigned_greater_than" => ConditionKind::UnassignedGreaterThan,
            "unassigned_less_than" => ConditionKind::UnassignedLessThan,
            _ => ConditionKind::Unknown,
        }
    }
}

/// One predicate of a conditional rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Predicate kind
    #[serde(rename = "type")]
    pub kind: ConditionKind,

    /// Envelope to inspect; required for balance conditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope_id: Option<String>,

    /// Comparison threshold (i64 minor units)
    pub value_minor: i64,
}

impl Condition {
    /// Create a condition without an envelope reference.
    pub fn new(kind: ConditionKind, value_minor: i64) -> Self {
        Self {
            kind,
            envelope_id: None,
            value_minor,
        }
    }

    /// Attach the envelope to inspect.
    pub fn for_envelope(mut self, envelope_id: impl Into<String>) -> Self {
        self.envelope_id = Some(envelope_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_kind_snake_case_tags() {
        assert_eq!(
            serde_json::to_string(&RuleKind::FixedAmount).unwrap(),
            "\"fixed_amount\""
        );
        assert_eq!(
            serde_json::to_string(&RuleKind::SplitRemainder).unwrap(),
            "\"split_remainder\""
        );

        let parsed: RuleKind = serde_json::from_str("\"priority_fill\"").unwrap();
        assert_eq!(parsed, RuleKind::PriorityFill);
    }

    #[test]
    fn test_unrecognized_rule_kind_deserializes_to_unknown() {
        // Forward compatibility: a payload from a newer client must not fail
        let parsed: RuleKind = serde_json::from_str("\"round_up_sweep\"").unwrap();
        assert_eq!(parsed, RuleKind::Unknown);
    }

    #[test]
    fn test_unrecognized_condition_kind_deserializes_to_unknown() {
        let parsed: ConditionKind = serde_json::from_str("\"date_range\"").unwrap();
        assert_eq!(parsed, ConditionKind::Unknown);
    }

    #[test]
    fn test_rule_deserializes_from_camel_case_payload() {
        let json = r#"{
            "id": "rule_1",
            "type": "percentage",
            "priority": 10,
            "enabled": true,
            "config": {
                "sourceType": "income",
                "targetId": "savings",
                "percentage": 30.0
            }
        }"#;

        let rule: Rule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.kind, RuleKind::Percentage);
        assert_eq!(rule.config.source_type, Some(SourceKind::Income));
        assert_eq!(rule.config.target_id.as_deref(), Some("savings"));
        assert_eq!(rule.config.percentage, Some(30.0));
    }

    #[test]
    fn test_enabled_defaults_to_true() {
        let json = r#"{"id": "r", "type": "fixed_amount", "priority": 1}"#;
        let rule: Rule = serde_json::from_str(json).unwrap();
        assert!(rule.enabled);
        assert_eq!(rule.config, RuleConfig::default());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Rule::new(RuleKind::FixedAmount, 1);
        let b = Rule::new(RuleKind::FixedAmount, 1);
        assert_ne!(a.id, b.id);
    }
}
