//! Largest-remainder dust distribution
//!
//! Proportional floor-division drops fractional minor units ("dust"). This
//! module redistributes that dust with the largest-remainder method so every
//! apportionment sums exactly to its input total.
//!
//! # Critical Invariants
//!
//! - **Zero-sum**: adjusted amounts sum exactly to the requested total
//! - **Dust bound**: at most `|dust|` entries change, each by one minor unit
//! - **Determinism**: remainders are compared as i128 numerators over the
//!   common denominator, never as floats; ties keep original input order
//!
//! CRITICAL: All money values are i64 (minor units)

/// Adjust `amounts` in place so they absorb `dust` minor units.
///
/// `remainders[i]` is the exact fractional remainder entry `i` dropped when
/// it was floored, expressed as a numerator over a denominator common to the
/// whole batch. Entries are ranked by remainder descending with ties broken
/// by original index ascending; the top `|dust|` entries move by one unit
/// each: up for positive dust, down for negative.
///
/// # Example
/// ```
/// use envelope_funding_core_rs::strategy::distribute_dust;
///
/// let mut amounts = vec![33, 33, 33];
/// // Common denominator 3: remainders 1/3, 1/3, 1/3; first entry wins the tie
/// distribute_dust(&mut amounts, &[1, 1, 1], 1);
/// assert_eq!(amounts, vec![34, 33, 33]);
/// ```
pub fn distribute_dust(amounts: &mut [i64], remainders: &[i128], dust: i64) {
    debug_assert_eq!(amounts.len(), remainders.len());
    if dust == 0 || amounts.is_empty() {
        return;
    }

    let mut order: Vec<usize> = (0..amounts.len()).collect();
    // Stable sort: remainder descending, original index ascending on ties.
    order.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]));

    let step = if dust > 0 { 1 } else { -1 };
    for &index in order.iter().take(dust.unsigned_abs() as usize) {
        amounts[index] += step;
    }
}

/// Proportionally apportion `total` across `weights`, cents-exact.
///
/// Each entry gets `floor(weight * total / total_weight)`; the dropped
/// fractions are resolved by [`distribute_dust`]. A zero total weight falls
/// back to [`equal_shares`] rather than dividing by zero. Negative weights
/// count as zero.
///
/// # Example
/// ```
/// use envelope_funding_core_rs::strategy::apportion;
///
/// let shares = apportion(250_000, &[100_000, 50_000, 100_000]);
/// assert_eq!(shares, vec![100_000, 50_000, 100_000]);
/// assert_eq!(shares.iter().sum::<i64>(), 250_000);
/// ```
pub fn apportion(total: i64, weights: &[i64]) -> Vec<i64> {
    if weights.is_empty() {
        return Vec::new();
    }

    let total_weight: i128 = weights.iter().map(|&w| i128::from(w.max(0))).sum();
    if total_weight == 0 {
        return equal_shares(total, weights.len());
    }

    // i128 products keep weight * total exact for any i64 inputs.
    let mut amounts = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());
    for &weight in weights {
        let numerator = i128::from(weight.max(0)) * i128::from(total);
        amounts.push((numerator / total_weight) as i64);
        remainders.push(numerator % total_weight);
    }

    let dust = total - amounts.iter().sum::<i64>();
    distribute_dust(&mut amounts, &remainders, dust);
    amounts
}

/// Split `total` into `count` equal integer shares.
///
/// The modulo remainder goes one unit each to the first `total mod count`
/// entries, in order.
pub fn equal_shares(total: i64, count: usize) -> Vec<i64> {
    if count == 0 {
        return Vec::new();
    }

    let n = count as i64;
    let base = total.div_euclid(n);
    let remainder = total.rem_euclid(n) as usize;
    (0..count).map(|i| base + i64::from(i < remainder)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_shares_remainder_goes_first() {
        assert_eq!(equal_shares(10, 3), vec![4, 3, 3]);
        assert_eq!(equal_shares(11, 3), vec![4, 4, 3]);
        assert_eq!(equal_shares(9, 3), vec![3, 3, 3]);
        assert_eq!(equal_shares(2, 5), vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_equal_shares_empty() {
        assert!(equal_shares(100, 0).is_empty());
    }

    #[test]
    fn test_apportion_exact_proportions_need_no_dust() {
        let shares = apportion(100, &[50, 30, 20]);
        assert_eq!(shares, vec![50, 30, 20]);
    }

    #[test]
    fn test_apportion_zero_sum_holds() {
        let shares = apportion(100_000, &[33_333, 33_333, 33_334]);
        assert_eq!(shares.iter().sum::<i64>(), 100_000);
    }

    #[test]
    fn test_apportion_zero_weights_fall_back_to_equal_split() {
        assert_eq!(apportion(10, &[0, 0, 0]), vec![4, 3, 3]);
    }

    #[test]
    fn test_apportion_negative_weight_counts_as_zero() {
        let shares = apportion(100, &[-50, 50, 50]);
        assert_eq!(shares, vec![0, 50, 50]);
    }

    #[test]
    fn test_distribute_dust_largest_remainder_wins() {
        // Remainders 3/7, 6/7, 5/7 over denominator 7
        let mut amounts = vec![10, 10, 10];
        distribute_dust(&mut amounts, &[3, 6, 5], 2);
        assert_eq!(amounts, vec![10, 11, 11]);
    }

    #[test]
    fn test_distribute_dust_tie_keeps_input_order() {
        let mut amounts = vec![10, 10, 10, 10];
        distribute_dust(&mut amounts, &[2, 2, 2, 2], 2);
        assert_eq!(amounts, vec![11, 11, 10, 10]);
    }

    #[test]
    fn test_distribute_dust_negative_dust_decrements() {
        let mut amounts = vec![10, 10, 10];
        distribute_dust(&mut amounts, &[3, 6, 5], -1);
        assert_eq!(amounts, vec![10, 9, 10]);
    }

    #[test]
    fn test_distribute_dust_zero_is_a_no_op() {
        let mut amounts = vec![1, 2, 3];
        distribute_dust(&mut amounts, &[1, 2, 3], 0);
        assert_eq!(amounts, vec![1, 2, 3]);
    }

    #[test]
    fn test_apportion_large_values_do_not_overflow() {
        // Weight * total would overflow i64; i128 intermediates must not
        let big = i64::MAX / 4;
        let shares = apportion(big, &[big, big, big]);
        assert_eq!(shares.iter().sum::<i64>(), big);
    }
}
