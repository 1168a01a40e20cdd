//! Transcript Abundance
//!
//! Vertices are grouped by the two-segment prefix of their name (the first
//! two `-`-delimited tokens), which identifies the parent sample/strain. The
//! per-component counts live in `ComponentProfile::abundance`; this module
//! holds the prefix extraction and the cross-component distribution.

use rustc_hash::FxHashMap;

/// First two `-`-delimited tokens of a vertex name ("S1-01-x" -> "S1-01").
///
/// Names with fewer than two tokens are used whole.
pub fn two_segment_prefix(name: &str) -> String {
    let mut tokens = name.splitn(3, '-');
    match (tokens.next(), tokens.next()) {
        (Some(first), Some(second)) => format!("{first}-{second}"),
        _ => name.to_string(),
    }
}

/// Number of components whose vertices all come from a single two-segment
/// prefix (monotypic components), across the whole network.
pub fn monotypic_component_count<'a>(
    per_component: impl IntoIterator<Item = &'a FxHashMap<String, usize>>,
) -> usize {
    per_component.into_iter().filter(|abundance| abundance.len() == 1).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_segment_prefix() {
        assert_eq!(two_segment_prefix("S1-01-x"), "S1-01");
        assert_eq!(two_segment_prefix("S1-01-x-extra-tokens"), "S1-01");
        assert_eq!(two_segment_prefix("plain"), "plain");
    }

    #[test]
    fn test_monotypic_component_count() {
        // First component draws from two prefixes, second from one.
        let mixed: FxHashMap<String, usize> =
            [("S1-01".to_string(), 2), ("S2-01".to_string(), 1)].into_iter().collect();
        let monotypic: FxHashMap<String, usize> =
            [("S3-02".to_string(), 4)].into_iter().collect();

        let count = monotypic_component_count([&mixed, &monotypic]);
        assert_eq!(count, 1);
    }
}
