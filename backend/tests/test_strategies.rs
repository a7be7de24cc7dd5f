//! Allocation strategy tests
//!
//! Covers the three strategies end to end, including the reference
//! scenarios: exact proportional splits, dust-corrected splits, and
//! bills-first target funding.

use envelope_funding_core_rs::models::{EnvelopeTarget, Frequency, PreviousAllocation};
use envelope_funding_core_rs::strategy::{allocate, Strategy};

/// Helper to create an envelope with a target
fn envelope(id: &str, target: i64) -> EnvelopeTarget {
    EnvelopeTarget::new(id, target)
}

fn amounts(strategy: Strategy, paycheck: i64, envelopes: &[EnvelopeTarget]) -> Vec<(String, i64)> {
    allocate(strategy, paycheck, envelopes, None, None)
        .into_iter()
        .map(|a| (a.envelope_id, a.amount_minor))
        .collect()
}

// ============================================================================
// EvenSplit
// ============================================================================

#[test]
fn test_even_split_exact_proportions() {
    // Paycheck equals the sum of targets: every envelope gets its target
    let envelopes = vec![
        envelope("rent", 100_000),
        envelope("groceries", 50_000),
        envelope("savings", 100_000),
    ];

    let result = amounts(Strategy::EvenSplit, 250_000, &envelopes);
    assert_eq!(
        result,
        vec![
            ("rent".to_string(), 100_000),
            ("groceries".to_string(), 50_000),
            ("savings".to_string(), 100_000),
        ]
    );
}

#[test]
fn test_even_split_resolves_dust_via_largest_remainder() {
    let envelopes = vec![
        envelope("a", 33_333),
        envelope("b", 33_333),
        envelope("c", 33_334),
    ];

    let result = amounts(Strategy::EvenSplit, 100_000, &envelopes);
    let total: i64 = result.iter().map(|(_, amount)| amount).sum();
    assert_eq!(total, 100_000);

    // Proportions stay within one unit of each other's exact shares
    assert!(result.iter().all(|&(_, amount)| (33_333..=33_334).contains(&amount)));
}

#[test]
fn test_even_split_biweekly_frequency_halves_targets() {
    let envelopes = vec![envelope("a", 100_000), envelope("b", 100_001)];

    // Biweekly weights: 50_000 and 50_001
    let allocations = allocate(
        Strategy::EvenSplit,
        100_001,
        &envelopes,
        None,
        Some(Frequency::Biweekly),
    );
    let total: i64 = allocations.iter().map(|a| a.amount_minor).sum();
    assert_eq!(total, 100_001);
    assert!(allocations[1].amount_minor >= allocations[0].amount_minor);
}

#[test]
fn test_even_split_all_zero_targets_split_equally() {
    let envelopes = vec![envelope("a", 0), envelope("b", 0), envelope("c", 0)];

    let result = amounts(Strategy::EvenSplit, 100, &envelopes);
    assert_eq!(
        result,
        vec![
            ("a".to_string(), 34),
            ("b".to_string(), 33),
            ("c".to_string(), 33),
        ]
    );
}

#[test]
fn test_even_split_empty_envelopes() {
    assert!(amounts(Strategy::EvenSplit, 100_000, &[]).is_empty());
}

// ============================================================================
// LastSplit
// ============================================================================

#[test]
fn test_last_split_scales_previous_allocation() {
    let previous = vec![
        PreviousAllocation::new("rent", 50_000),
        PreviousAllocation::new("savings", 25_000),
        PreviousAllocation::new("fun", 25_000),
    ];

    let allocations = allocate(Strategy::LastSplit, 200_000, &[], Some(&previous), None);
    let result: Vec<(String, i64)> = allocations
        .into_iter()
        .map(|a| (a.envelope_id, a.amount_minor))
        .collect();
    assert_eq!(
        result,
        vec![
            ("rent".to_string(), 100_000),
            ("savings".to_string(), 50_000),
            ("fun".to_string(), 50_000),
        ]
    );
}

#[test]
fn test_last_split_zero_sum_after_inexact_scaling() {
    let previous = vec![
        PreviousAllocation::new("a", 3),
        PreviousAllocation::new("b", 3),
        PreviousAllocation::new("c", 1),
    ];

    let allocations = allocate(Strategy::LastSplit, 1_000, &[], Some(&previous), None);
    let total: i64 = allocations.iter().map(|a| a.amount_minor).sum();
    assert_eq!(total, 1_000);
}

#[test]
fn test_last_split_without_history_is_an_even_split() {
    let envelopes = vec![envelope("a", 60_000), envelope("b", 40_000)];

    let with_missing = amounts(Strategy::LastSplit, 10_000, &envelopes);
    let even = amounts(Strategy::EvenSplit, 10_000, &envelopes);
    assert_eq!(with_missing, even);
}

// ============================================================================
// TargetFirst
// ============================================================================

#[test]
fn test_target_first_funds_bills_before_discretionary() {
    let envelopes = vec![
        envelope("fun", 50_000).with_category("discretionary"),
        envelope("rent", 100_000).with_category("bills"),
        envelope("utilities", 30_000).with_category("bills"),
    ];

    let result = amounts(Strategy::TargetFirst, 180_000, &envelopes);
    assert_eq!(
        result,
        vec![
            ("rent".to_string(), 100_000),
            ("utilities".to_string(), 30_000),
            ("fun".to_string(), 50_000),
        ]
    );
}

#[test]
fn test_target_first_short_paycheck_funds_a_prefix() {
    let envelopes = vec![
        envelope("fun", 50_000).with_category("discretionary"),
        envelope("rent", 100_000).with_category("bills"),
    ];

    let result = amounts(Strategy::TargetFirst, 60_000, &envelopes);
    assert_eq!(
        result,
        vec![("rent".to_string(), 60_000), ("fun".to_string(), 0)]
    );
}

#[test]
fn test_target_first_surplus_spreads_over_sorted_order() {
    let envelopes = vec![
        envelope("b", 1_000).with_priority(2),
        envelope("a", 1_000).with_priority(1),
    ];

    // 2_000 fills both targets, 11 surplus splits 6/5 down the sorted order
    let result = amounts(Strategy::TargetFirst, 2_011, &envelopes);
    assert_eq!(
        result,
        vec![("a".to_string(), 1_006), ("b".to_string(), 1_005)]
    );
}

// ============================================================================
// Cross-strategy laws
// ============================================================================

#[test]
fn test_zero_paycheck_yields_all_zero_allocations_everywhere() {
    let envelopes = vec![envelope("a", 100), envelope("b", 0)];

    for strategy in [Strategy::EvenSplit, Strategy::TargetFirst] {
        let allocations = allocate(strategy, 0, &envelopes, None, None);
        assert_eq!(allocations.len(), 2);
        assert!(allocations.iter().all(|a| a.amount_minor == 0));
    }
}

#[test]
fn test_identical_inputs_yield_identical_outputs() {
    let envelopes = vec![
        envelope("x", 12_345).with_priority(3),
        envelope("y", 54_321).with_category("bills"),
        envelope("z", 999),
    ];

    for strategy in [Strategy::EvenSplit, Strategy::LastSplit, Strategy::TargetFirst] {
        let first = allocate(strategy, 77_777, &envelopes, None, None);
        let second = allocate(strategy, 77_777, &envelopes, None, None);
        assert_eq!(first, second);
    }
}
