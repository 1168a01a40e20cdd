//! Pipeline Configuration
//!
//! All run parameters are carried in an explicit `PipelineConfig` value that
//! is threaded into the filter and graph stages. Nothing is read from ambient
//! process state; a config can be loaded from a JSON file or built in code.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Run parameters for the SSN pipeline
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Identity thresholds in percent. Cross-producted with `coverage`.
    /// Empty together with `coverage` selects deduplication-only filtering.
    #[serde(default)]
    pub identity: Vec<f64>,

    /// Coverage (percent-positivity) thresholds in percent
    #[serde(default)]
    pub coverage: Vec<f64>,

    /// Field delimiter of the raw (headerless) alignment table
    #[serde(default = "default_edge_delimiter")]
    pub edge_delimiter: char,

    /// Minimum vertex count for a connected component to be retained
    #[serde(default = "default_min_component_size")]
    pub min_component_size: usize,

    /// Deduplication-only mode passes self-loops through unless this is set.
    /// Threshold filtering always drops self-loops regardless.
    #[serde(default)]
    pub drop_self_loops_in_dedup: bool,
}

fn default_edge_delimiter() -> char {
    '\t'
}

fn default_min_component_size() -> usize {
    3
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            identity: Vec::new(),
            coverage: Vec::new(),
            edge_delimiter: default_edge_delimiter(),
            min_component_size: default_min_component_size(),
            drop_self_loops_in_dedup: false,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: PipelineConfig =
            serde_json::from_str(&contents).with_context(|| "Failed to parse config JSON")?;

        Ok(config)
    }

    /// All (identity, coverage) threshold pairs requested by this config
    pub fn threshold_pairs(&self) -> Vec<(f64, f64)> {
        let mut pairs = Vec::with_capacity(self.identity.len() * self.coverage.len());
        for &ident in &self.identity {
            for &cov in &self.coverage {
                pairs.push((ident, cov));
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.edge_delimiter, '\t');
        assert_eq!(config.min_component_size, 3);
        assert!(!config.drop_self_loops_in_dedup);
        assert!(config.threshold_pairs().is_empty());
    }

    #[test]
    fn test_threshold_pairs_cross_product() {
        let config = PipelineConfig {
            identity: vec![80.0, 90.0],
            coverage: vec![70.0],
            ..PipelineConfig::default()
        };
        assert_eq!(config.threshold_pairs(), vec![(80.0, 70.0), (90.0, 70.0)]);
    }

    #[test]
    fn test_load_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"identity": [90.0], "coverage": [80.0], "min_component_size": 5}}"#
        )
        .unwrap();

        let config = PipelineConfig::load(file.path()).unwrap();
        assert_eq!(config.identity, vec![90.0]);
        assert_eq!(config.coverage, vec![80.0]);
        assert_eq!(config.min_component_size, 5);
        // Unspecified fields fall back to defaults
        assert_eq!(config.edge_delimiter, '\t');
    }
}
