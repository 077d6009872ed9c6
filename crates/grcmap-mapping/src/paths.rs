//! # Path Finder
//!
//! Shortest framework-to-framework paths over the [`MappingGraph`].
//!
//! ## Point-to-point ([`all_paths_between`])
//!
//! 1. A direct edge short-circuits the search: the answer is the single
//!    one-hop path, even if longer indirect paths exist.
//! 2. Otherwise a breadth-first search runs from the source. Each frontier
//!    entry carries its partial path and the nodes it has visited, so no
//!    path revisits a framework. Once the destination is first reached,
//!    every other path of that same length is collected and the search
//!    stops expanding.
//! 3. `max_depth` bounds the number of hops. Longer paths are dropped.
//!
//! ## Bulk enumeration ([`all_paths_from`])
//!
//! A single lazy BFS that yields, for every reachable framework, each path
//! achieving that framework's minimal hop count. A framework is never
//! re-entered through a strictly longer path once a shorter one is known.
//!
//! `source == destination` is not a path query; callers special-case it.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use grcmap_core::FrameworkUrn;

use crate::graph::MappingGraph;

/// Ordered sequence of frameworks, each consecutive pair an edge.
pub type FrameworkPath = Vec<FrameworkUrn>;

/// Entry in the point-to-point BFS frontier.
struct Frontier<'g> {
    path: Vec<&'g FrameworkUrn>,
    visited: HashSet<&'g FrameworkUrn>,
}

/// All shortest paths from `source` to `dest`, each at most `max_depth`
/// hops. Empty when `dest` is unreachable within the bound.
pub fn all_paths_between<'g>(
    graph: &'g MappingGraph,
    source: &'g FrameworkUrn,
    dest: &'g FrameworkUrn,
    max_depth: Option<usize>,
) -> Vec<FrameworkPath> {
    if source == dest || max_depth == Some(0) {
        return Vec::new();
    }
    if graph.has_edge(source, dest) {
        return vec![vec![source.clone(), dest.clone()]];
    }

    let mut found: Vec<FrameworkPath> = Vec::new();
    let mut shortest: Option<usize> = None;
    let mut queue = VecDeque::new();
    queue.push_back(Frontier {
        path: vec![source],
        visited: HashSet::from([source]),
    });

    while let Some(Frontier { path, visited }) = queue.pop_front() {
        let hops = path.len() - 1;

        // BFS pops paths in non-decreasing length; nothing after this can tie.
        if shortest.is_some_and(|len| hops > len) {
            break;
        }

        let Some(&last) = path.last() else {
            continue;
        };
        if last == dest {
            shortest = Some(hops);
            found.push(path.into_iter().cloned().collect());
            continue;
        }

        if shortest.is_some() || max_depth.is_some_and(|max| hops >= max) {
            continue;
        }

        for next in graph.neighbors(last) {
            if visited.contains(next) {
                continue;
            }
            let mut next_path = path.clone();
            next_path.push(next);
            let mut next_visited = visited.clone();
            next_visited.insert(next);
            queue.push_back(Frontier {
                path: next_path,
                visited: next_visited,
            });
        }
    }

    tracing::debug!(
        source = %source,
        dest = %dest,
        paths = found.len(),
        hops = shortest,
        "path search complete"
    );
    found
}

/// Lazily enumerate every minimal-length path from `source` to each
/// framework reachable within `max_depth` hops.
pub fn all_paths_from(
    graph: Arc<MappingGraph>,
    source: &FrameworkUrn,
    max_depth: Option<usize>,
) -> ReachablePaths {
    ReachablePaths::new(graph, source.clone(), max_depth)
}

/// Iterator returned by [`all_paths_from`].
///
/// Paths are yielded in BFS order: all one-hop paths, then all two-hop
/// paths, and so on. Each call to [`all_paths_from`] starts a fresh search.
#[derive(Debug)]
pub struct ReachablePaths {
    graph: Arc<MappingGraph>,
    queue: VecDeque<FrameworkPath>,
    /// Minimal hop count recorded per framework.
    depth: HashMap<FrameworkUrn, usize>,
    max_depth: Option<usize>,
}

impl ReachablePaths {
    fn new(graph: Arc<MappingGraph>, source: FrameworkUrn, max_depth: Option<usize>) -> Self {
        let mut depth = HashMap::new();
        depth.insert(source.clone(), 0);
        let mut queue = VecDeque::new();
        queue.push_back(vec![source]);
        Self {
            graph,
            queue,
            depth,
            max_depth,
        }
    }

    fn expand(&mut self, path: &FrameworkPath) {
        let hops = path.len() - 1;
        if self.max_depth.is_some_and(|max| hops >= max) {
            return;
        }
        let Some(last) = path.last() else {
            return;
        };
        let next_hops = hops + 1;
        for next in self.graph.neighbors(last) {
            if path.contains(next) {
                continue;
            }
            match self.depth.get(next) {
                Some(&known) if known < next_hops => continue,
                Some(_) => {}
                None => {
                    self.depth.insert(next.clone(), next_hops);
                }
            }
            let mut next_path = path.clone();
            next_path.push(next.clone());
            self.queue.push_back(next_path);
        }
    }
}

impl Iterator for ReachablePaths {
    type Item = FrameworkPath;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.queue.pop_front() {
            self.expand(&path);
            if path.len() > 1 {
                return Some(path);
            }
        }
        None
    }
}
