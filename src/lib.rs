//! Sequence Similarity Network Pipeline
//!
//! Filters raw all-vs-all alignment tables, assembles the surviving
//! alignments into an undirected sequence-similarity network, decomposes it
//! into connected components, and derives per-component taxonomic and
//! functional statistics for downstream TSV/GraphML consumers.
//!
//! The stages compose but run independently: [`filter::run_filter`] streams
//! an alignment file through deduplication or threshold filtering, and
//! [`pipeline::SsnAnalyzer`] turns one filtered edge/vertex table pair into a
//! [`pipeline::NetworkAnalysis`] that [`report::write_all`] serializes.

pub mod annotate;
pub mod config;
pub mod data;
pub mod filter;
pub mod graph;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use config::PipelineConfig;
pub use data::{AlignmentRecord, PipelineError, VertexAttributes, VertexTable};
pub use filter::{run_filter, FilterOutcome, FilterStats, ThresholdRun};
pub use graph::{ConnectedComponent, SsnGraph};
pub use pipeline::{NetworkAnalysis, SsnAnalyzer};
