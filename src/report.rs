//! Per-Component Output Tables and GraphML Export
//!
//! Serializes one `NetworkAnalysis` into the table set downstream tooling
//! consumes, one file per statistic, under `{out_dir}/{cov}_{ident}/` with
//! names derived deterministically from the threshold labels. Map-valued
//! tables are written in sorted key order so reruns are byte-identical.

use crate::data::VertexTable;
use crate::graph::SsnGraph;
use crate::pipeline::NetworkAnalysis;
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::{Path, PathBuf};

/// Write every output table plus the GraphML export.
///
/// An empty component set still produces the full (empty) table set.
pub fn write_all(
    analysis: &NetworkAnalysis,
    out_dir: &Path,
    cov: &str,
    ident: &str,
) -> Result<PathBuf> {
    let run_dir = out_dir.join(format!("{cov}_{ident}"));
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("Failed to create output directory {:?}", run_dir))?;

    let table = |name: &str, ext: &str| run_dir.join(format!("{name}_{cov}_{ident}.{ext}"));

    write_file(
        &table("abund_matrix", "tsv"),
        &nested_usize_table(analysis.components.iter().map(|c| (c.index, &c.profile.abundance))),
    )?;
    write_file(
        &table("abund_matrix_distrib", "tsv"),
        &format!("single_prefix_components\t{}\n", analysis.monotypic_components),
    )?;

    write_file(
        &table("function_percentage", "tsv"),
        &nested_f64_table(analysis.components.iter().map(|c| (c.index, &c.stats.function_pct))),
    )?;
    write_file(
        &table("phylum_percentage", "tsv"),
        &nested_f64_table(analysis.components.iter().map(|c| (c.index, &c.stats.phylum_pct))),
    )?;
    write_file(
        &table("genus_percentage", "tsv"),
        &nested_f64_table(analysis.components.iter().map(|c| (c.index, &c.stats.genus_pct))),
    )?;
    write_file(
        &table("trophy_percentage", "tsv"),
        &nested_f64_table(analysis.components.iter().map(|c| (c.index, &c.stats.trophy_pct))),
    )?;

    // Per-component size plus the network-wide size histogram
    let mut cc_sizes = String::new();
    for component in &analysis.components {
        writeln!(cc_sizes, "{}\t{}", component.index, component.stats.size)?;
    }
    write_file(&table("cc_nb", "txt"), &cc_sizes)?;

    let mut histogram: Vec<(usize, usize)> =
        analysis.size_histogram.iter().map(|(&k, &v)| (k, v)).collect();
    histogram.sort_unstable();
    let mut size_distrib = String::new();
    for (size, count) in histogram {
        writeln!(size_distrib, "{size}\t{count}")?;
    }
    write_file(&table("cc_size_distrib", "tsv"), &size_distrib)?;

    write_file(
        &table("trophy_count", "tsv"),
        &nested_usize_table(analysis.components.iter().map(|c| (c.index, &c.stats.trophy_counts))),
    )?;

    let mut unique = String::new();
    let mut labels: Vec<(&String, &usize)> = analysis.trophy_uniqueness.unique.iter().collect();
    labels.sort_by(|a, b| a.0.cmp(b.0));
    for (label, count) in labels {
        writeln!(unique, "{label}\t{count}")?;
    }
    writeln!(unique, "not_unique\t{}", analysis.trophy_uniqueness.not_unique)?;
    write_file(&table("unique_trophy", "tsv"), &unique)?;

    write_file(
        &table("homogeneity_index", "tsv"),
        &nested_f64_table(analysis.components.iter().map(|c| (c.index, &c.stats.homogeneity))),
    )?;

    let mut entropy = String::new();
    for component in &analysis.components {
        writeln!(entropy, "{}\t{}", component.index, component.stats.function_entropy)?;
    }
    write_file(&table("entropy_by_function", "tsv"), &entropy)?;

    let graphml = render_graphml(&analysis.graph, &analysis.vertices)?;
    write_file(&run_dir.join(format!("graph_ssn_{cov}_{ident}.graphml")), &graphml)?;

    Ok(run_dir)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
}

fn nested_f64_table<'a>(
    rows: impl Iterator<Item = (usize, &'a FxHashMap<String, f64>)>,
) -> String {
    let mut out = String::new();
    for (index, map) in rows {
        let mut entries: Vec<(&String, &f64)> = map.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in entries {
            let _ = writeln!(out, "{index}\t{key}\t{value}");
        }
    }
    out
}

fn nested_usize_table<'a>(
    rows: impl Iterator<Item = (usize, &'a FxHashMap<String, usize>)>,
) -> String {
    let mut out = String::new();
    for (index, map) in rows {
        let mut entries: Vec<(&String, &usize)> = map.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in entries {
            let _ = writeln!(out, "{index}\t{key}\t{value}");
        }
    }
    out
}

/// Render the pruned attributed graph as GraphML for external visualization.
fn render_graphml(graph: &SsnGraph, vertices: &VertexTable) -> Result<String> {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">\n");
    for (id, name) in
        [("d0", "identifiant"), ("d1", "Phylum_Metdb"), ("d2", "Genus_Metdb"), ("d3", "Trophy")]
    {
        writeln!(out, "  <key id=\"{id}\" for=\"node\" attr.name=\"{name}\" attr.type=\"string\"/>")?;
    }
    out.push_str("  <graph edgedefault=\"undirected\">\n");

    let missing = crate::data::VertexAttributes::na();
    for name in graph.names() {
        let attrs = vertices.get(name).unwrap_or(&missing);
        writeln!(out, "    <node id=\"{}\">", xml_escape(name))?;
        let values = [&attrs.identifiant, &attrs.phylum, &attrs.genus, &attrs.trophy];
        for (key, value) in ["d0", "d1", "d2", "d3"].iter().zip(values) {
            writeln!(out, "      <data key=\"{key}\">{}</data>", xml_escape(value))?;
        }
        out.push_str("    </node>\n");
    }

    for (query, target) in graph.edge_names() {
        writeln!(
            out,
            "    <edge source=\"{}\" target=\"{}\"/>",
            xml_escape(query),
            xml_escape(target)
        )?;
    }

    out.push_str("  </graph>\n</graphml>\n");
    Ok(out)
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
