//! Trophic-Mode Statistics
//!
//! Per-component trophy label counts plus the network-wide uniqueness
//! classification: a component with exactly one distinct trophy label is
//! "unique" under that label, anything mixed lands in a shared not_unique
//! counter.

use rustc_hash::{FxHashMap, FxHashSet};

/// Count occurrences of each trophy label within a component
pub fn trophy_counts(trophies: &[String]) -> FxHashMap<String, usize> {
    let mut counts = FxHashMap::default();
    for trophy in trophies {
        *counts.entry(trophy.clone()).or_insert(0) += 1;
    }
    counts
}

/// Network-wide trophy uniqueness tally
#[derive(Debug, Clone, Default)]
pub struct TrophyUniqueness {
    /// Components monomorphic for a label, keyed by that label
    pub unique: FxHashMap<String, usize>,
    /// Components carrying more than one distinct label
    pub not_unique: usize,
}

impl TrophyUniqueness {
    /// Classify one component's trophy labels into the tally.
    pub fn record(&mut self, trophies: &[String]) {
        let distinct: FxHashSet<&str> = trophies.iter().map(|t| t.as_str()).collect();
        match distinct.len() {
            0 => {}
            1 => {
                let label = trophies[0].clone();
                *self.unique.entry(label).or_insert(0) += 1;
            }
            _ => self.not_unique += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_trophy_counts() {
        let counts = trophy_counts(&labels(&["photo", "photo", "mixo"]));
        assert_eq!(counts["photo"], 2);
        assert_eq!(counts["mixo"], 1);
    }

    #[test]
    fn test_monomorphic_component_is_unique() {
        let mut tally = TrophyUniqueness::default();
        tally.record(&labels(&["photo", "photo", "photo"]));

        assert_eq!(tally.unique["photo"], 1);
        assert_eq!(tally.not_unique, 0);
    }

    #[test]
    fn test_mixed_component_is_not_unique() {
        let mut tally = TrophyUniqueness::default();
        tally.record(&labels(&["photo", "hetero"]));
        tally.record(&labels(&["photo", "NA", "photo"]));

        assert!(tally.unique.is_empty());
        assert_eq!(tally.not_unique, 2);
    }

    #[test]
    fn test_na_counts_as_a_label() {
        // A component whose only label is "NA" is unique under "NA".
        let mut tally = TrophyUniqueness::default();
        tally.record(&labels(&["NA", "NA"]));
        assert_eq!(tally.unique["NA"], 1);
    }
}
