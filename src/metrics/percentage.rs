//! Percentage Distribution
//!
//! Share of each distinct value in a categorical list, rounded to 2 decimals.

use rustc_hash::FxHashMap;

/// Percentage of each distinct value: round(count / total * 100, 2).
///
/// An empty input yields an empty map (an empty component set is a valid,
/// if uninteresting, result).
pub fn percentage_distribution(labels: &[String]) -> FxHashMap<String, f64> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for label in labels {
        *counts.entry(label.as_str()).or_insert(0) += 1;
    }

    let total = labels.len() as f64;
    counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), round2(count as f64 / total * 100.0)))
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_distribution() {
        let pct = percentage_distribution(&labels(&["a", "a", "b", "c"]));
        assert_relative_eq!(pct["a"], 50.0);
        assert_relative_eq!(pct["b"], 25.0);
        assert_relative_eq!(pct["c"], 25.0);
    }

    #[test]
    fn test_sums_to_100_within_rounding() {
        // 3-way split rounds to 33.33 each; sum must stay within the
        // 2-decimal rounding epsilon.
        let pct = percentage_distribution(&labels(&["a", "b", "c"]));
        let sum: f64 = pct.values().sum();
        assert!((sum - 100.0).abs() <= 0.02, "sum was {sum}");

        let pct = percentage_distribution(&labels(&["a", "a", "a", "b", "b", "c", "c"]));
        let sum: f64 = pct.values().sum();
        assert!((sum - 100.0).abs() <= 0.02, "sum was {sum}");
    }

    #[test]
    fn test_empty_input() {
        assert!(percentage_distribution(&[]).is_empty());
    }
}
