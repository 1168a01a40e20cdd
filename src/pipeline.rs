//! SSN Analyzer - Main coordinator for the network analysis stages
//!
//! Wires the forward-only data flow: load tables, build and prune the graph,
//! decompose into connected components, annotate each component, and derive
//! the per-component statistics. Components share no mutable state, so the
//! annotate+statistics stage runs under Rayon; the discovery-order component
//! index is preserved through the ordered parallel collect.

use crate::annotate::{annotate_component, ComponentProfile};
use crate::config::PipelineConfig;
use crate::data::{load_edge_table, load_vertex_table, VertexTable};
use crate::graph::SsnGraph;
use crate::metrics::{
    compute_component_stats, monotypic_component_count, size_histogram, ComponentStats,
    TrophyUniqueness,
};
use crate::utils::databases::DATABASE_PREFIX_RULES;
use anyhow::Result;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::path::Path;

/// One component's annotation collections and derived statistics
#[derive(Debug)]
pub struct ComponentSummary {
    pub index: usize,
    pub profile: ComponentProfile,
    pub stats: ComponentStats,
}

/// Everything the reporting stage serializes for one network
#[derive(Debug)]
pub struct NetworkAnalysis {
    pub components: Vec<ComponentSummary>,
    pub trophy_uniqueness: TrophyUniqueness,
    /// Components drawing all vertices from a single two-segment prefix
    pub monotypic_components: usize,
    /// Component size -> number of components of that size
    pub size_histogram: FxHashMap<usize, usize>,
    /// The pruned graph, kept for GraphML export
    pub graph: SsnGraph,
    pub vertices: VertexTable,
}

/// Main analyzer over one filtered SSN
pub struct SsnAnalyzer {
    config: PipelineConfig,
}

impl SsnAnalyzer {
    pub fn new(config: PipelineConfig) -> Self {
        SsnAnalyzer { config }
    }

    /// Run graph construction, decomposition, and statistics for one
    /// edge/vertex table pair.
    pub fn analyze(&self, edges_path: &Path, vertices_path: &Path) -> Result<NetworkAnalysis> {
        println!("Loading vertex table: {:?}", vertices_path);
        let vertices = load_vertex_table(vertices_path)?;
        println!("Loading edge table: {:?}", edges_path);
        let edges = load_edge_table(edges_path)?;
        println!("  Vertices: {}", vertices.len());
        println!("  Edges: {}", edges.height());

        let graph = SsnGraph::from_tables(&edges, &vertices)?;
        let graph = graph.prune_isolated();
        let components = graph.connected_components(self.config.min_component_size);
        println!(
            "  Connected components (>= {} vertices): {}",
            self.config.min_component_size,
            components.len()
        );

        self.summarize(graph, vertices, components)
    }

    /// Annotate and score an already-decomposed component list.
    pub fn summarize(
        &self,
        graph: SsnGraph,
        vertices: VertexTable,
        components: Vec<crate::graph::ConnectedComponent>,
    ) -> Result<NetworkAnalysis> {
        // Embarrassingly parallel: one task per component, index order kept
        // by the ordered collect.
        let summaries: Vec<ComponentSummary> = components
            .par_iter()
            .map(|component| {
                let profile = annotate_component(component, &vertices, DATABASE_PREFIX_RULES);
                let stats = compute_component_stats(&profile);
                ComponentSummary { index: component.index, profile, stats }
            })
            .collect();

        let mut trophy_uniqueness = TrophyUniqueness::default();
        for summary in &summaries {
            trophy_uniqueness.record(&summary.profile.trophies);
        }

        let monotypic_components =
            monotypic_component_count(summaries.iter().map(|s| &s.profile.abundance));

        let sizes: Vec<usize> = summaries.iter().map(|s| s.stats.size).collect();
        let size_histogram = size_histogram(sizes.iter());

        Ok(NetworkAnalysis {
            components: summaries,
            trophy_uniqueness,
            monotypic_components,
            size_histogram,
            graph,
            vertices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::VertexAttributes;
    use approx::assert_relative_eq;
    use polars::prelude::*;

    fn vertex_table(rows: &[(&str, &str, &str, &str, &str)]) -> VertexTable {
        let names: Vec<String> = rows.iter().map(|r| r.0.to_string()).collect();
        let attrs = rows
            .iter()
            .map(|&(name, identifiant, phylum, genus, trophy)| {
                (
                    name.to_string(),
                    VertexAttributes {
                        identifiant: identifiant.to_string(),
                        phylum: phylum.to_string(),
                        genus: genus.to_string(),
                        trophy: trophy.to_string(),
                    },
                )
            })
            .collect();
        VertexTable { names, attrs }
    }

    #[test]
    fn test_summarize_two_components() {
        let vertices = vertex_table(&[
            ("S1-01-a", "PF00069", "Bacillariophyta", "Thalassiosira", "photo"),
            ("S1-01-b", "PF00069", "Bacillariophyta", "Navicula", "photo"),
            ("S2-01-c", "PF00069|SM00220", "Dinophyta", "Alexandrium", "photo"),
            ("S3-05-d", "IPR000719", "NA", "NA", "mixo"),
            ("S3-05-e", "IPR000719", "NA", "NA", "hetero"),
            ("S3-05-f", "nan", "NA", "NA", "mixo"),
        ]);
        let edges = df!(
            "qseqid" => &["S1-01-a", "S1-01-b", "S3-05-d", "S3-05-e"],
            "sseqid" => &["S1-01-b", "S2-01-c", "S3-05-e", "S3-05-f"]
        )
        .unwrap();

        let graph = SsnGraph::from_tables(&edges, &vertices).unwrap().prune_isolated();
        let components = graph.connected_components(3);
        let analyzer = SsnAnalyzer::new(PipelineConfig::default());
        let analysis = analyzer.summarize(graph, vertices, components).unwrap();

        assert_eq!(analysis.components.len(), 2);

        // Component 0: all photo -> unique; two prefixes -> not monotypic
        let first = &analysis.components[0];
        assert_eq!(first.index, 0);
        assert_eq!(first.stats.size, 3);
        assert_relative_eq!(first.stats.trophy_pct["photo"], 100.0);
        assert_eq!(first.profile.abundance["S1-01"], 2);
        assert_eq!(first.profile.abundance["S2-01"], 1);

        // Component 1: mixed trophies, single prefix -> monotypic
        let second = &analysis.components[1];
        assert_eq!(second.index, 1);
        assert_eq!(second.profile.abundance["S3-05"], 3);

        assert_eq!(analysis.trophy_uniqueness.unique["photo"], 1);
        assert_eq!(analysis.trophy_uniqueness.not_unique, 1);
        assert_eq!(analysis.monotypic_components, 1);
        assert_eq!(analysis.size_histogram[&3], 2);
    }

    #[test]
    fn test_empty_network_is_valid() {
        let vertices = vertex_table(&[]);
        let edges = df!(
            "qseqid" => Vec::<String>::new(),
            "sseqid" => Vec::<String>::new()
        )
        .unwrap();

        let graph = SsnGraph::from_tables(&edges, &vertices).unwrap().prune_isolated();
        let components = graph.connected_components(3);
        let analyzer = SsnAnalyzer::new(PipelineConfig::default());
        let analysis = analyzer.summarize(graph, vertices, components).unwrap();

        assert!(analysis.components.is_empty());
        assert_eq!(analysis.monotypic_components, 0);
        assert!(analysis.size_histogram.is_empty());
    }
}
