//! Per-component statistics
//!
//! Each statistic is a pure function of one component's raw collections, so
//! the orchestrator can evaluate components in parallel without shared state.

pub mod abundance;
pub mod entropy;
pub mod homogeneity;
pub mod percentage;
pub mod trophy;

pub use abundance::{monotypic_component_count, two_segment_prefix};
pub use entropy::normalized_entropy;
pub use homogeneity::homogeneity_index;
pub use percentage::percentage_distribution;
pub use trophy::{trophy_counts, TrophyUniqueness};

use crate::annotate::ComponentProfile;
use rustc_hash::FxHashMap;

/// Derived statistics for one connected component
#[derive(Debug, Clone)]
pub struct ComponentStats {
    /// Member vertex count
    pub size: usize,
    pub function_pct: FxHashMap<String, f64>,
    pub phylum_pct: FxHashMap<String, f64>,
    pub genus_pct: FxHashMap<String, f64>,
    pub trophy_pct: FxHashMap<String, f64>,
    pub trophy_counts: FxHashMap<String, usize>,
    /// Normalized Shannon entropy of the function percentages
    pub function_entropy: f64,
    /// Homogeneity index per database
    pub homogeneity: FxHashMap<String, f64>,
}

/// Compute every per-component statistic from its raw collections.
pub fn compute_component_stats(profile: &ComponentProfile) -> ComponentStats {
    let function_pct = percentage_distribution(&profile.functions);
    let function_entropy = normalized_entropy(&function_pct);

    let homogeneity = profile
        .db_identifiers
        .iter()
        .map(|(database, counts)| (database.clone(), homogeneity_index(counts)))
        .collect();

    ComponentStats {
        size: profile.phyla.len(),
        function_pct,
        phylum_pct: percentage_distribution(&profile.phyla),
        genus_pct: percentage_distribution(&profile.genera),
        trophy_pct: percentage_distribution(&profile.trophies),
        trophy_counts: trophy_counts(&profile.trophies),
        function_entropy,
        homogeneity,
    }
}

/// Histogram of component sizes across the whole network
pub fn size_histogram<'a>(sizes: impl IntoIterator<Item = &'a usize>) -> FxHashMap<usize, usize> {
    let mut histogram = FxHashMap::default();
    for &size in sizes {
        *histogram.entry(size).or_insert(0) += 1;
    }
    histogram
}
