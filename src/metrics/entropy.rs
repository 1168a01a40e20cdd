//! Normalized Shannon Entropy
//!
//! Entropy of a percentage distribution over n categories, computed with
//! log base n and rounded to 3 decimals.
//!
//! Monomorphic components (one category at 100%) return 1, not the textbook
//! entropy of 0: downstream tables read 1 as "fully homogeneous". The
//! inversion is deliberate and load-bearing; both paths are covered by tests.

use rustc_hash::FxHashMap;

/// Normalized Shannon entropy of a percentage distribution.
pub fn normalized_entropy(percentages: &FxHashMap<String, f64>) -> f64 {
    let n = percentages.len();

    // Short-circuit: a category holding 100% marks the component as fully
    // homogeneous, encoded as 1.
    for &value in percentages.values() {
        if value / 100.0 >= 1.0 {
            return 1.0;
        }
    }

    if n < 2 {
        return 0.0;
    }

    let base = n as f64;
    let mut entropy = 0.0;
    for &value in percentages.values() {
        let p = value / 100.0;
        if p > 0.0 {
            entropy -= p * p.log(base);
        }
    }
    round3(entropy)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
