//! Caller-side rule validation
//!
//! The engine itself is permissive by design: it skips what it does not
//! understand and soft-fails missing envelopes. Strict callers run this
//! validation before invoking the engine to surface misconfigured rules as
//! errors instead, including target ids that do not resolve against the
//! context.

use thiserror::Error;

use crate::models::{AllocationContext, Rule, RuleKind};

/// One validation failure, tied to the offending rule.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuleValidationError {
    #[error("rule {rule_id}: a positive amount is required")]
    MissingAmount { rule_id: String },

    #[error("rule {rule_id}: percentage must be within (0, 100], got {percentage}")]
    PercentageOutOfRange { rule_id: String, percentage: f64 },

    #[error("rule {rule_id}: at least one condition is required")]
    NoConditions { rule_id: String },

    #[error("rule {rule_id}: a target envelope is required")]
    MissingTarget { rule_id: String },

    #[error("rule {rule_id}: at least one split target is required")]
    NoSplitTargets { rule_id: String },

    #[error("rule {rule_id}: envelope {envelope_id} does not exist")]
    UnknownEnvelope {
        rule_id: String,
        envelope_id: String,
    },
}

/// Validate every rule against the context, collecting all failures.
///
/// # Example
/// ```
/// use envelope_funding_core_rs::models::{AllocationContext, Rule, RuleKind};
/// use envelope_funding_core_rs::rules::validate_rules;
///
/// let rules = vec![Rule::new(RuleKind::FixedAmount, 1).with_id("r1")];
/// let context = AllocationContext::new(1_000, vec![]);
///
/// let errors = validate_rules(&rules, &context).unwrap_err();
/// assert_eq!(errors.len(), 2); // no amount, no target
/// ```
pub fn validate_rules(
    rules: &[Rule],
    context: &AllocationContext,
) -> Result<(), Vec<RuleValidationError>> {
    let mut errors = Vec::new();
    for rule in rules {
        validate_rule(rule, context, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_rule(rule: &Rule, context: &AllocationContext, errors: &mut Vec<RuleValidationError>) {
    match rule.kind {
        RuleKind::FixedAmount => {
            require_positive_amount(rule, errors);
            require_target(rule, errors);
        }
        RuleKind::Percentage => {
            let percentage = rule.config.percentage.unwrap_or(0.0);
            if !(percentage > 0.0 && percentage <= 100.0) {
                errors.push(RuleValidationError::PercentageOutOfRange {
                    rule_id: rule.id.clone(),
                    percentage,
                });
            }
            require_target(rule, errors);
        }
        RuleKind::PriorityFill => {
            require_target(rule, errors);
        }
        RuleKind::SplitRemainder => {
            if rule.config.target_ids.is_empty() {
                errors.push(RuleValidationError::NoSplitTargets {
                    rule_id: rule.id.clone(),
                });
            }
        }
        RuleKind::Conditional => {
            require_positive_amount(rule, errors);
            require_target(rule, errors);
            if rule.config.conditions.is_empty() {
                errors.push(RuleValidationError::NoConditions {
                    rule_id: rule.id.clone(),
                });
            }
        }
        RuleKind::Unknown => {}
    }

    // Every referenced envelope must resolve against the context
    for envelope_id in referenced_envelopes(rule) {
        if context.find_envelope(envelope_id).is_none() {
            errors.push(RuleValidationError::UnknownEnvelope {
                rule_id: rule.id.clone(),
                envelope_id: envelope_id.to_string(),
            });
        }
    }
}

fn require_positive_amount(rule: &Rule, errors: &mut Vec<RuleValidationError>) {
    if rule.config.amount_minor.unwrap_or(0) <= 0 {
        errors.push(RuleValidationError::MissingAmount {
            rule_id: rule.id.clone(),
        });
    }
}

fn require_target(rule: &Rule, errors: &mut Vec<RuleValidationError>) {
    if rule.config.target_id.is_none() {
        errors.push(RuleValidationError::MissingTarget {
            rule_id: rule.id.clone(),
        });
    }
}

fn referenced_envelopes(rule: &Rule) -> impl Iterator<Item = &str> {
    rule.config
        .target_id
        .iter()
        .map(String::as_str)
        .chain(rule.config.target_ids.iter().map(String::as_str))
        .chain(
            rule.config
                .conditions
                .iter()
                .filter_map(|c| c.envelope_id.as_deref()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, ConditionKind, EnvelopeTarget};

    fn context() -> AllocationContext {
        AllocationContext::new(10_000, vec![EnvelopeTarget::new("rent", 100_000)])
    }

    #[test]
    fn test_valid_rules_pass() {
        let rules = vec![
            Rule::new(RuleKind::FixedAmount, 1)
                .with_target("rent")
                .with_amount(500),
            Rule::new(RuleKind::Percentage, 2)
                .with_target("rent")
                .with_percentage(25.0),
            Rule::new(RuleKind::SplitRemainder, 3).with_targets(["rent"]),
        ];

        assert!(validate_rules(&rules, &context()).is_ok());
    }

    #[test]
    fn test_fixed_amount_requires_positive_amount_and_target() {
        let rules = vec![Rule::new(RuleKind::FixedAmount, 1).with_id("r1")];
        let errors = validate_rules(&rules, &context()).unwrap_err();

        assert!(errors.contains(&RuleValidationError::MissingAmount {
            rule_id: "r1".to_string()
        }));
        assert!(errors.contains(&RuleValidationError::MissingTarget {
            rule_id: "r1".to_string()
        }));
    }

    #[test]
    fn test_percentage_bounds() {
        for bad in [0.0, -5.0, 100.5] {
            let rules = vec![Rule::new(RuleKind::Percentage, 1)
                .with_target("rent")
                .with_percentage(bad)];
            assert!(validate_rules(&rules, &context()).is_err(), "{bad} must fail");
        }

        let rules = vec![Rule::new(RuleKind::Percentage, 1)
            .with_target("rent")
            .with_percentage(100.0)];
        assert!(validate_rules(&rules, &context()).is_ok());
    }

    #[test]
    fn test_conditional_requires_conditions() {
        let rules = vec![Rule::new(RuleKind::Conditional, 1)
            .with_id("r1")
            .with_target("rent")
            .with_amount(100)];
        let errors = validate_rules(&rules, &context()).unwrap_err();

        assert_eq!(
            errors,
            vec![RuleValidationError::NoConditions {
                rule_id: "r1".to_string()
            }]
        );
    }

    #[test]
    fn test_unresolved_envelope_references_are_reported() {
        let rules = vec![Rule::new(RuleKind::Conditional, 1)
            .with_id("r1")
            .with_target("vacation")
            .with_amount(100)
            .with_condition(
                Condition::new(ConditionKind::BalanceLessThan, 50).for_envelope("gone"),
            )];
        let errors = validate_rules(&rules, &context()).unwrap_err();

        let unknown: Vec<_> = errors
            .iter()
            .filter(|e| matches!(e, RuleValidationError::UnknownEnvelope { .. }))
            .collect();
        assert_eq!(unknown.len(), 2);
    }

    #[test]
    fn test_unknown_rule_kind_is_not_validated() {
        let rules = vec![Rule::new(RuleKind::Unknown, 1)];
        assert!(validate_rules(&rules, &context()).is_ok());
    }
}
