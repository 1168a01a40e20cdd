//! Component Annotator
//!
//! Collects, for each surviving connected component, the raw per-vertex
//! attribute values the statistics engine consumes: database-function tags
//! resolved from `identifiant`, phylum/genus/trophy labels ("NA" when
//! absent), abundance counts grouped by two-segment name prefix, and the
//! nested database -> identifier -> count multiset.

use crate::data::{VertexAttributes, VertexTable};
use crate::graph::ConnectedComponent;
use crate::metrics::abundance::two_segment_prefix;
use crate::utils::databases::resolve_database;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Raw per-component collections, one entry per vertex (or per identifier
/// for the function/database fields)
#[derive(Debug, Clone, Default)]
pub struct ComponentProfile {
    /// Database-function tag per raw identifier, "NA" included
    pub functions: Vec<String>,
    /// Phylum label per vertex
    pub phyla: Vec<String>,
    /// Genus label per vertex
    pub genera: Vec<String>,
    /// Trophy label per vertex
    pub trophies: Vec<String>,
    /// Member vertices per two-segment name prefix
    pub abundance: FxHashMap<String, usize>,
    /// database -> raw identifier -> occurrence count
    pub db_identifiers: FxHashMap<String, FxHashMap<String, usize>>,
}

/// Collect the raw attribute values of one component's member vertices.
///
/// A vertex missing from the attribute table contributes "NA" everywhere,
/// matching the loader's treatment of empty fields.
pub fn annotate_component(
    component: &ConnectedComponent,
    vertices: &VertexTable,
    rules: &[(&str, &str)],
) -> ComponentProfile {
    let mut profile = ComponentProfile::default();
    let na = VertexAttributes::na();

    for name in &component.members {
        let attrs = vertices.get(name).unwrap_or(&na);

        // Most vertices carry only a handful of identifiers
        let identifiers: SmallVec<[&str; 8]> = attrs
            .identifiant
            .split('|')
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .collect();

        for identifier in &identifiers {
            let database = resolve_database(identifier, rules);
            profile.functions.push(database.to_string());
            *profile
                .db_identifiers
                .entry(database.to_string())
                .or_default()
                .entry(identifier.to_string())
                .or_insert(0) += 1;
        }

        profile.phyla.push(attrs.phylum.clone());
        profile.genera.push(attrs.genus.clone());
        profile.trophies.push(attrs.trophy.clone());

        *profile.abundance.entry(two_segment_prefix(name)).or_insert(0) += 1;
    }

    profile
}
