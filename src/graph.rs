//! Graph Builder and Component Decomposer
//!
//! Builds an undirected attributed graph from the filtered edge table and the
//! vertex table, strips isolated vertices, and decomposes the result into
//! connected components. Multi-edges between the same pair are kept; an edge
//! endpoint absent from the vertex table or a surviving self-loop is an
//! input-contract violation and fails the run.

use crate::data::{PipelineError, VertexTable};
use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Undirected multigraph over named vertices
#[derive(Debug, Clone)]
pub struct SsnGraph {
    names: Vec<String>,
    name_to_index: FxHashMap<String, usize>,
    adjacency: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

/// A surviving connected component.
///
/// `index` is the 0-based discovery-order identifier used as the join key of
/// every downstream table.
#[derive(Debug, Clone)]
pub struct ConnectedComponent {
    pub index: usize,
    pub members: Vec<String>,
}

impl ConnectedComponent {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl SsnGraph {
    /// Build the graph from a filtered edge table and the vertex table.
    ///
    /// Vertices take the attribute table's file order, which pins component
    /// discovery order. Edge rows are read from the `qseqid`/`sseqid`
    /// columns.
    pub fn from_tables(edges: &DataFrame, vertices: &VertexTable) -> Result<Self> {
        let mut graph = SsnGraph::with_vertices(&vertices.names);

        let query_col = edges
            .column("qseqid")
            .with_context(|| "Column 'qseqid' not found in edge table")?
            .str()?;
        let target_col = edges
            .column("sseqid")
            .with_context(|| "Column 'sseqid' not found in edge table")?
            .str()?;

        for row in 0..edges.height() {
            let query = query_col.get(row).unwrap_or("");
            let target = target_col.get(row).unwrap_or("");
            graph.add_edge_by_name(query, target, row)?;
        }

        Ok(graph)
    }

    fn with_vertices(names: &[String]) -> Self {
        let mut name_to_index = FxHashMap::default();
        for (idx, name) in names.iter().enumerate() {
            name_to_index.insert(name.clone(), idx);
        }
        SsnGraph {
            names: names.to_vec(),
            name_to_index,
            adjacency: vec![Vec::new(); names.len()],
            edges: Vec::new(),
        }
    }

    fn add_edge_by_name(&mut self, query: &str, target: &str, row: usize) -> Result<()> {
        if query == target {
            return Err(PipelineError::SelfLoop { name: query.to_string() }.into());
        }
        let q = *self.name_to_index.get(query).ok_or_else(|| PipelineError::UnknownVertex {
            edge: row,
            name: query.to_string(),
        })?;
        let t = *self.name_to_index.get(target).ok_or_else(|| PipelineError::UnknownVertex {
            edge: row,
            name: target.to_string(),
        })?;

        self.adjacency[q].push(t);
        self.adjacency[t].push(q);
        self.edges.push((q, t));
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Edge list as name pairs, in input order
    pub fn edge_names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().map(|&(q, t)| (self.names[q].as_str(), self.names[t].as_str()))
    }

    /// Drop every degree-0 vertex, rebuilding the graph over the survivors.
    pub fn prune_isolated(&self) -> SsnGraph {
        let retained: Vec<String> = self
            .names
            .iter()
            .enumerate()
            .filter(|&(idx, _)| !self.adjacency[idx].is_empty())
            .map(|(_, name)| name.clone())
            .collect();

        let mut pruned = SsnGraph::with_vertices(&retained);
        for &(q, t) in &self.edges {
            // Every edge endpoint has degree >= 1, so lookups cannot fail.
            let q_new = pruned.name_to_index[&self.names[q]];
            let t_new = pruned.name_to_index[&self.names[t]];
            pruned.adjacency[q_new].push(t_new);
            pruned.adjacency[t_new].push(q_new);
            pruned.edges.push((q_new, t_new));
        }
        pruned
    }

    /// Decompose into connected components via BFS in vertex order.
    ///
    /// Components smaller than `min_size` are discarded; survivors receive
    /// consecutive 0-based indices in discovery order.
    pub fn connected_components(&self, min_size: usize) -> Vec<ConnectedComponent> {
        let mut visited = vec![false; self.names.len()];
        let mut components = Vec::new();
        let mut next_index = 0;

        for start in 0..self.names.len() {
            if visited[start] {
                continue;
            }
            visited[start] = true;

            let mut members = Vec::new();
            let mut queue = VecDeque::from([start]);
            while let Some(vertex) = queue.pop_front() {
                members.push(self.names[vertex].clone());
                for &neighbor in &self.adjacency[vertex] {
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        queue.push_back(neighbor);
                    }
                }
            }

            if members.len() >= min_size {
                components.push(ConnectedComponent { index: next_index, members });
                next_index += 1;
            }
        }

        components
    }
}
