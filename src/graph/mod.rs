use crate::collections::FxIndexMap;
use crate::errors::RoutePlannerError;


/// Undirected weighted graph of airports and routes, stored as an
/// adjacency list keyed by airport id.
///
/// Node ids are opaque strings. Adjacency iteration follows insertion
/// order, so identical construction sequences always yield identical
/// neighbor orderings - the search algorithms rely on this for their
/// deterministic tie-break.
///
/// The graph performs no internal locking. Shared read-only access from
/// several tasks is safe; interleaving mutation with searches is the
/// caller's responsibility to serialize (in practice `&mut self` on the
/// mutators already enforces this).
#[derive(Debug, Default, Clone)]
pub struct RouteGraph {
    adjacency: FxIndexMap<String, FxIndexMap<String, f64>>,
}

impl RouteGraph {

    pub fn new() -> Self {
        Self::default()
    }

    /// Add an airport to the graph. Idempotent - re-adding an existing id
    /// is a no-op.
    pub fn add_node(&mut self, id: &str) -> Result<(), RoutePlannerError> {
        if id.is_empty() {
            return Err(RoutePlannerError::InvalidArgument(
                "node id must not be empty".to_string(),
            ));
        }
        self.adjacency.entry(id.to_string()).or_default();
        Ok(())
    }

    /// Insert or update the undirected edge between `u` and `v`.
    ///
    /// Both endpoints are auto-inserted if missing. Re-inserting an edge
    /// between the same pair updates the weight in place - this is how a
    /// re-derived weight takes effect after a delay/frequency change.
    /// A negative or non-finite weight fails with `InvalidWeight` and
    /// leaves the graph untouched.
    pub fn add_edge(&mut self, u: &str, v: &str, weight: f64) -> Result<(), RoutePlannerError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(RoutePlannerError::InvalidWeight(weight));
        }
        if u.is_empty() || v.is_empty() {
            return Err(RoutePlannerError::InvalidArgument(
                "node id must not be empty".to_string(),
            ));
        }
        self.add_node(u)?;
        self.add_node(v)?;

        // Symmetric insert: v reachable from u and u from v, same weight
        self.adjacency[u].insert(v.to_string(), weight);
        self.adjacency[v].insert(u.to_string(), weight);
        Ok(())
    }

    /// Neighbors of `id` with their edge weights.
    /// Unknown ids yield an empty iterator rather than an error - callers
    /// frequently query before insertion during incremental construction.
    pub fn neighbors(&self, id: &str) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.adjacency
            .get(id)
            .into_iter()
            .flatten()
            .map(|(node, weight)| (node.as_str(), *weight))
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    pub fn has_edge(&self, u: &str, v: &str) -> bool {
        self.adjacency
            .get(u)
            .is_some_and(|edges| edges.contains_key(v))
    }

    /// Weight of the edge between `u` and `v`, or `None` if no such edge.
    /// "No edge" is an expected case in cost calculations (treated as
    /// infinite by the searches), so it is a sentinel rather than an error.
    pub fn edge_weight(&self, u: &str, v: &str) -> Option<f64> {
        self.adjacency.get(u)?.get(v).copied()
    }

    /// Number of distinct airports in the graph
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// All airport ids in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.adjacency.keys().map(String::as_str)
    }
}
