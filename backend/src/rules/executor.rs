//! Ordered autofunding rule pipeline
//!
//! Runs a list of rules against a shared cash pool. Rules execute in
//! ascending priority order (stable on ties); each rule sees the pool as
//! left by every rule before it, and envelope balances as a point-in-time
//! snapshot that never changes mid-pass.
//!
//! Rule evaluation is strictly sequential: a rule's clamping depends on the
//! cumulative remaining pool, so this loop must not be parallelized.
//!
//! # Critical Invariants
//!
//! - **Pool conservation**: total allocated never exceeds the initial pool;
//!   no rule allocates more than what remains when it runs
//! - **No negative allocations** for non-negative inputs
//! - **Rule ordering**: output records appear in execution order
//!
//! The pass is total: it never errors. Unknown rule kinds produce nothing,
//! and a priority-fill rule pointed at a missing envelope yields a
//! zero-amount record with an explanatory reason instead of aborting.

use crate::models::{AllocationContext, Rule, RuleAllocation, RuleKind, SourceKind};

use super::conditions::evaluate_conditions;

const REASON_FIXED: &str = "fixed transfer";
const REASON_CONDITIONAL: &str = "conditions met, fixed transfer";
const REASON_PERCENT_UNASSIGNED: &str = "percentage of unassigned cash";
const REASON_PERCENT_INCOME: &str = "percentage of new income";
const REASON_FILL: &str = "fill toward monthly target";
const REASON_MISSING_TARGET: &str = "target envelope not found";
const REASON_SPLIT: &str = "split of remaining funds";

/// Outcome of one executor pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulePassOutcome {
    /// Produced allocations, in rule execution order
    pub allocations: Vec<RuleAllocation>,

    /// Enabled rules evaluated, including ones that produced zero amounts
    pub rules_executed: usize,

    /// Pool left after the pass (i64 minor units)
    pub remaining_minor: i64,
}

/// Run one autofunding pass.
///
/// # Example
/// ```
/// use envelope_funding_core_rs::models::{AllocationContext, Rule, RuleKind};
/// use envelope_funding_core_rs::rules::execute_rules;
///
/// let rules = vec![Rule::new(RuleKind::FixedAmount, 1)
///     .with_target("rent")
///     .with_amount(80_000)];
/// let context = AllocationContext::new(100_000, vec![]);
///
/// let outcome = execute_rules(&rules, &context);
/// assert_eq!(outcome.allocations[0].amount_minor, 80_000);
/// assert_eq!(outcome.remaining_minor, 20_000);
/// ```
pub fn execute_rules(rules: &[Rule], context: &AllocationContext) -> RulePassOutcome {
    let mut ordered: Vec<&Rule> = rules.iter().collect();
    // Stable sort: ties keep input order.
    ordered.sort_by_key(|rule| rule.priority);

    let mut pool = context.unassigned_cash_minor;
    let mut allocations = Vec::new();
    let mut rules_executed = 0;

    for rule in ordered {
        if !rule.enabled {
            continue;
        }
        rules_executed += 1;

        let produced = dispatch(rule, context, pool);
        let spent: i64 = produced.iter().map(|a| a.amount_minor).sum();
        pool -= spent;
        allocations.extend(produced);
    }

    RulePassOutcome {
        allocations,
        rules_executed,
        remaining_minor: pool,
    }
}

fn dispatch(rule: &Rule, context: &AllocationContext, pool: i64) -> Vec<RuleAllocation> {
    match rule.kind {
        RuleKind::FixedAmount => fixed_amount(rule, pool, REASON_FIXED),
        RuleKind::Percentage => percentage(rule, context, pool),
        RuleKind::PriorityFill => priority_fill(rule, context, pool),
        RuleKind::SplitRemainder => split_remainder(rule, pool),
        RuleKind::Conditional => conditional(rule, context, pool),
        // Unrecognized kinds produce nothing so newer rule payloads keep working
        RuleKind::Unknown => Vec::new(),
    }
}

/// `min(requested, pool)`, floored at zero, credited to the single target.
fn fixed_amount(rule: &Rule, pool: i64, reason: &str) -> Vec<RuleAllocation> {
    let Some(target_id) = rule.config.target_id.as_deref() else {
        return Vec::new();
    };

    let amount = rule.config.amount_minor.unwrap_or(0).min(pool).max(0);
    vec![RuleAllocation {
        envelope_id: target_id.to_string(),
        amount_minor: amount,
        reason: reason.to_string(),
        rule_id: rule.id.clone(),
    }]
}

/// `floor(base * percentage / 100)` clamped to the pool.
///
/// The wire-level percentage is converted once to integer basis points, then
/// the amount is computed in i128; no float enters the money math.
fn percentage(rule: &Rule, context: &AllocationContext, pool: i64) -> Vec<RuleAllocation> {
    let Some(target_id) = rule.config.target_id.as_deref() else {
        return Vec::new();
    };

    let (base, reason) = match rule.config.source_type {
        Some(SourceKind::Income) => (
            context.new_income_amount_minor.unwrap_or(0),
            REASON_PERCENT_INCOME,
        ),
        // Unset or unrecognized sources draw from the pool
        _ => (pool, REASON_PERCENT_UNASSIGNED),
    };

    let bps = basis_points(rule.config.percentage.unwrap_or(0.0));
    let raw = (i128::from(base.max(0)) * i128::from(bps) / 10_000) as i64;
    let amount = raw.clamp(0, pool.max(0));

    vec![RuleAllocation {
        envelope_id: target_id.to_string(),
        amount_minor: amount,
        reason: reason.to_string(),
        rule_id: rule.id.clone(),
    }]
}

/// Top the target envelope up to its monthly target, bounded by the pool.
///
/// A missing envelope is the engine's one soft error: a zero-amount record
/// with an explanatory reason, so one misconfigured rule cannot block the
/// rest of the pass.
fn priority_fill(rule: &Rule, context: &AllocationContext, pool: i64) -> Vec<RuleAllocation> {
    let Some(target_id) = rule.config.target_id.as_deref() else {
        return Vec::new();
    };

    match context.find_envelope(target_id) {
        None => vec![RuleAllocation {
            envelope_id: target_id.to_string(),
            amount_minor: 0,
            reason: REASON_MISSING_TARGET.to_string(),
            rule_id: rule.id.clone(),
        }],
        Some(envelope) => {
            let needed = envelope.monthly_target_minor - envelope.current_balance_minor;
            let amount = needed.min(pool).max(0);
            vec![RuleAllocation {
                envelope_id: target_id.to_string(),
                amount_minor: amount,
                reason: REASON_FILL.to_string(),
                rule_id: rule.id.clone(),
            }]
        }
    }
}

/// Floor-divide the pool across the targets; the first target takes the
/// modulo remainder.
fn split_remainder(rule: &Rule, pool: i64) -> Vec<RuleAllocation> {
    let targets = &rule.config.target_ids;
    if targets.is_empty() {
        return Vec::new();
    }

    let count = targets.len() as i64;
    let per_target = pool.max(0) / count;
    let remainder = pool.max(0) % count;

    targets
        .iter()
        .enumerate()
        .map(|(i, target_id)| RuleAllocation {
            envelope_id: target_id.clone(),
            amount_minor: per_target + if i == 0 { remainder } else { 0 },
            reason: REASON_SPLIT.to_string(),
            rule_id: rule.id.clone(),
        })
        .collect()
}

/// Fixed transfer gated on the rule's conditions.
fn conditional(rule: &Rule, context: &AllocationContext, pool: i64) -> Vec<RuleAllocation> {
    if !evaluate_conditions(&rule.config.conditions, &context.envelopes, pool) {
        return Vec::new();
    }
    fixed_amount(rule, pool, REASON_CONDITIONAL)
}

fn basis_points(percentage: f64) -> i64 {
    if !percentage.is_finite() {
        return 0;
    }
    (percentage * 100.0).round() as i64
}
