//! # Mapping Graph
//!
//! Directed graph whose nodes are frameworks and whose edges are the
//! ordered pairs for which a mapping set exists. Only direct edges are
//! stored; transitive reachability is discovered by the path finder.
//!
//! Adjacency is kept in ordered collections so that every traversal visits
//! neighbours in the same order, which makes path enumeration and
//! best-path tie-breaking deterministic.

use std::collections::{BTreeMap, BTreeSet};

use grcmap_core::{EdgeKey, FrameworkUrn};

/// Framework-to-framework adjacency built from mapping-set keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingGraph {
    /// Framework → frameworks it has a mapping set towards.
    adjacency: BTreeMap<FrameworkUrn, BTreeSet<FrameworkUrn>>,
}

impl MappingGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from edge keys. Self-loops are ignored.
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a EdgeKey>) -> Self {
        let mut graph = Self::new();
        for key in edges {
            graph.insert_edge(key);
        }
        graph
    }

    /// Add an edge. Returns `false` for self-loops and duplicates.
    pub fn insert_edge(&mut self, key: &EdgeKey) -> bool {
        if key.source == key.target {
            return false;
        }
        self.adjacency
            .entry(key.source.clone())
            .or_default()
            .insert(key.target.clone())
    }

    /// Whether a direct mapping set exists from `source` to `target`.
    pub fn has_edge(&self, source: &FrameworkUrn, target: &FrameworkUrn) -> bool {
        self.adjacency
            .get(source)
            .is_some_and(|targets| targets.contains(target))
    }

    /// Direct successors of `node`, in URN order.
    pub fn neighbors<'g>(&'g self, node: &FrameworkUrn) -> impl Iterator<Item = &'g FrameworkUrn> {
        self.adjacency.get(node).into_iter().flatten()
    }

    /// Every edge, ordered by (source, target).
    pub fn edges(&self) -> impl Iterator<Item = (&FrameworkUrn, &FrameworkUrn)> {
        self.adjacency
            .iter()
            .flat_map(|(source, targets)| targets.iter().map(move |target| (source, target)))
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum()
    }

    /// Every framework appearing as a source or a target.
    pub fn nodes(&self) -> BTreeSet<&FrameworkUrn> {
        self.edges().flat_map(|(s, t)| [s, t]).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
