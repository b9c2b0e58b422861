
pub mod dijkstra;
pub mod a_star;
mod shortest_path;

use serde::Serialize;

use shortest_path::shortest_path;

use crate::collections::FxIndexMap;

/// Map of discovered nodes for one search invocation.
/// The tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent node in the map
///   (usize::MAX for the source, which has no parent)
/// - cost is the best known cost to reach this node from the source
/// Keys borrow from the graph; the map is created fresh per call and
/// discarded on return.
pub(crate) type NodeMap<'a> = FxIndexMap<&'a str, (usize, f64)>;


/// Outcome of an authoritative search.
///
/// An unreachable target is a normal result: `path` is empty and
/// `total_cost` is infinite, no error is raised.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Node ids from source to target, empty when unreachable
    pub path: Vec<String>,
    /// Accumulated edge weight along `path`, infinite when unreachable
    pub total_cost: f64,
    /// Nodes whose cost was finalized during the search
    pub visited_count: usize,
    /// Heap extractions examined, including stale entries
    pub step_count: usize,
}

impl SearchResult {

    pub fn is_unreachable(&self) -> bool {
        self.path.is_empty()
    }

    fn unreachable(visited_count: usize, step_count: usize) -> Self {
        Self {
            path: Vec::new(),
            total_cost: f64::INFINITY,
            visited_count,
            step_count,
        }
    }
}
