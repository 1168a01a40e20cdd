//! Homogeneity Index
//!
//! How strongly one database's identifiers repeat within a component:
//! 1 - distinct/total occurrences, rounded to 3 decimals. A database
//! contributing a single distinct identifier scores 1 regardless of how
//! often it occurs.

use rustc_hash::FxHashMap;

/// Homogeneity index of one database's identifier multiset within a component.
pub fn homogeneity_index(identifier_counts: &FxHashMap<String, usize>) -> f64 {
    let distinct = identifier_counts.len();
    if distinct == 1 {
        return 1.0;
    }
    let total: usize = identifier_counts.values().sum();
    if total == 0 {
        return 0.0;
    }
    round3(1.0 - distinct as f64 / total as f64)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn counts(entries: &[(&str, usize)]) -> FxHashMap<String, usize> {
        entries.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_single_identifier_is_one_regardless_of_count() {
        assert_relative_eq!(homogeneity_index(&counts(&[("PF00069", 1)])), 1.0);
        assert_relative_eq!(homogeneity_index(&counts(&[("PF00069", 42)])), 1.0);
    }

    #[test]
    fn test_mixed_identifiers() {
        // u = 2, t = 4 -> 1 - 2/4 = 0.5
        let index = homogeneity_index(&counts(&[("PF00069", 2), ("PF00071", 2)]));
        assert_relative_eq!(index, 0.5);

        // u = 3, t = 10 -> 0.7
        let index = homogeneity_index(&counts(&[("a", 6), ("b", 3), ("c", 1)]));
        assert_relative_eq!(index, 0.7);
    }

    #[test]
    fn test_all_distinct_is_zero() {
        let index = homogeneity_index(&counts(&[("a", 1), ("b", 1), ("c", 1)]));
        assert_relative_eq!(index, 0.0);
    }
}
