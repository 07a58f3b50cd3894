//! Information-theoretic primitives shared by the split evaluators.

/// Shannon entropy (base 2) of a count distribution.
///
/// `counts` need not be normalized; `total` is their sum. Zero counts
/// contribute nothing, and a zero total yields zero entropy.
pub fn entropy(counts: &[f64], total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    let mut result = 0.0;
    for &n in counts {
        if n > 0.0 {
            result -= n * n.log2();
        }
    }
    result += total * total.log2();
    result / total
}

/// Entropy over integer counts.
pub fn entropy_counts(counts: &[usize], total: usize) -> f64 {
    let counts = counts.iter().map(|&n| n as f64).collect::<Vec<_>>();
    entropy(&counts, total as f64)
}

/// Weighted average of `values`, with `total` the sum of `weights`.
pub fn weighted_average(values: &[f64], weights: &[f64], total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    values
        .iter()
        .zip(weights)
        .map(|(v, w)| v * w)
        .sum::<f64>()
        / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_entropy_of_pure_distribution_is_zero() {
        assert_eq!(entropy_counts(&[8, 0], 8), 0.0);
        assert_eq!(entropy_counts(&[0, 0, 5], 5), 0.0);
    }

    #[test]
    fn test_entropy_of_even_distribution_is_one_bit() {
        assert_relative_eq!(entropy_counts(&[4, 4], 8), 1.0, epsilon = 1e-9);
        assert_relative_eq!(entropy(&[0.5, 0.5], 1.0), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_entropy_of_empty_distribution_is_zero() {
        assert_eq!(entropy_counts(&[0, 0], 0), 0.0);
        assert_eq!(entropy(&[], 0.0), 0.0);
    }

    #[test]
    fn test_entropy_known_values() {
        // Classic examples: 2/3 of 5, 9/5 of 14.
        assert!(entropy_counts(&[2, 3], 5) > 0.9);
        assert!(entropy_counts(&[2, 3], 5) < 1.0);
        assert!(entropy_counts(&[9, 5], 14) > 0.9);
        assert!(entropy_counts(&[9, 5], 14) < 1.0);
        assert!(entropy_counts(&[2, 3, 4], 9) > 1.5);
        assert!(entropy_counts(&[2, 3, 4], 9) < 1.6);
    }

    #[test]
    fn test_entropy_with_many_classes() {
        let counts = vec![1usize; 32];
        assert_relative_eq!(entropy_counts(&counts, 32), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_weighted_average() {
        assert_relative_eq!(
            weighted_average(&[1.0, 0.0], &[2.0, 2.0], 4.0),
            0.5,
            epsilon = 1e-9
        );
        assert_eq!(weighted_average(&[1.0], &[1.0], 0.0), 0.0);
    }
}
