use crate::errors::RoutePlannerError;
use crate::graph::RouteGraph;
use super::{NodeMap, SearchResult, shortest_path};

use std::{collections::BinaryHeap, cmp::Ordering};
use ordered_float::OrderedFloat;
use indexmap::map::Entry::{Occupied, Vacant};




/// Find the shortest path between two airports using Dijkstra's algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
///
/// Uniform-cost search over the accumulated edge weight alone. Fails with
/// `InvalidArgument` if either endpoint is absent from the graph; an
/// unreachable target is a normal result (empty path, infinite cost).
///
/// Repeated runs over an identically constructed graph return identical
/// paths: equal-cost frontier entries pop in discovery order.
pub fn dijkstra<'a>(
    graph: &'a RouteGraph,
    source: &'a str,
    target: &'a str,
) -> Result<SearchResult, RoutePlannerError> {

    ensure_endpoints(graph, source, target)?;

    // Nodes to visit - the reversed ordering on FrontierNode makes the
    // BinaryHeap pop the lowest-cost entry first
    let mut frontier: BinaryHeap<FrontierNode> = BinaryHeap::new();

    // Discovered nodes with their best known (parent_index, cost)
    let mut node_map: NodeMap<'a> = NodeMap::default();

    // Seed the source with cost 0 and no parent
    let source_index = node_map.insert_full(source, (usize::MAX, 0.0)).0;
    frontier.push(FrontierNode {
        index: source_index,
        cost: OrderedFloat(0.0),
    });

    let mut visited_count = 0;
    let mut step_count = 0;

    // Loop over each node to visit, removing the smallest node
    while let Some(FrontierNode { index, cost }) = frontier.pop() {
        step_count += 1;

        // fetch current best cost for node
        let (&node, &(_, best)) = node_map.get_index(index).unwrap();

        // If cost of new node from BinaryHeap is higher than the best cost, skip it
        // This implies we've already found a better path to this node
        if cost.0 > best {
            continue;
        }
        visited_count += 1;

        // The target's cost is final once it is popped
        if node == target {
            let path = shortest_path(&node_map, index);
            tracing::debug!(
                source,
                target,
                total_cost = best,
                visited_count,
                "dijkstra reached target"
            );
            return Ok(SearchResult {
                path,
                total_cost: best,
                visited_count,
                step_count,
            });
        }

        // loop over neighbors
        for (neighbor, edge_weight) in graph.neighbors(node) {

            // new cost to reach this node = edge cost + node cost
            let new_cost = best + edge_weight;

            // Check if we've found a better path to this neighbor
            let neighbor_index = match node_map.entry(neighbor) {
                Vacant(e) => {
                    // This is the first time we're seeing this neighbor
                    let i = e.index();
                    e.insert((index, new_cost));
                    i
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        // We've found a better path to this neighbor
                        let i = e.index();
                        e.insert((index, new_cost));
                        i
                    } else {
                        // The existing path is better, do nothing
                        continue;
                    }
                }
            };

            // Only add to the queue if we've found a better path
            frontier.push(FrontierNode {
                index: neighbor_index,
                cost: OrderedFloat(new_cost),
            });
        }
    }

    tracing::debug!(source, target, visited_count, "dijkstra exhausted frontier");
    Ok(SearchResult::unreachable(visited_count, step_count))
}


/// Both endpoints must exist before a search starts
pub(crate) fn ensure_endpoints(
    graph: &RouteGraph,
    source: &str,
    target: &str,
) -> Result<(), RoutePlannerError> {
    if !graph.has_node(source) {
        return Err(RoutePlannerError::InvalidArgument(format!(
            "unknown source node: {source}"
        )));
    }
    if !graph.has_node(target) {
        return Err(RoutePlannerError::InvalidArgument(format!(
            "unknown target node: {target}"
        )));
    }
    Ok(())
}


/// Frontier entry
/// - for ordering we only need the cost and the node's index in the map
/// - ordering is reversed so the max-heap behaves as a min-heap, with
///   the lower map index winning among equal costs so that pops are
///   deterministic for identical input
#[derive(Debug)]
struct FrontierNode {
    index: usize,
    cost: OrderedFloat<f64>,
}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for FrontierNode {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.index == other.index
    }
}
impl Eq for FrontierNode {}


#[cfg(test)]
mod tests {
    use super::*;

    // Triangle where the two-hop route is cheaper than the direct one
    fn triangle() -> RouteGraph {
        let mut graph = RouteGraph::new();
        graph.add_edge("A", "B", 5.0).unwrap();
        graph.add_edge("B", "C", 5.0).unwrap();
        graph.add_edge("A", "C", 20.0).unwrap();
        graph
    }

    #[test]
    fn test_two_hop_route_beats_direct() {
        let graph = triangle();
        let result = dijkstra(&graph, "A", "C").unwrap();

        assert_eq!(result.path, vec!["A", "B", "C"]);
        assert_eq!(result.total_cost, 10.0);
    }

    #[test]
    fn test_forced_two_hop_without_direct_edge() {
        let mut graph = RouteGraph::new();
        graph.add_edge("A", "B", 5.0).unwrap();
        graph.add_edge("B", "C", 5.0).unwrap();

        let result = dijkstra(&graph, "A", "C").unwrap();
        assert_eq!(result.path, vec!["A", "B", "C"]);
        assert_eq!(result.total_cost, 10.0);
    }

    #[test]
    fn test_disconnected_target_is_unreachable_not_an_error() {
        let mut graph = triangle();
        graph.add_node("D").unwrap();

        let result = dijkstra(&graph, "A", "D").unwrap();
        assert!(result.is_unreachable());
        assert!(result.path.is_empty());
        assert_eq!(result.total_cost, f64::INFINITY);
    }

    #[test]
    fn test_missing_endpoints_fail() {
        let graph = triangle();

        assert!(matches!(
            dijkstra(&graph, "A", "XXX"),
            Err(RoutePlannerError::InvalidArgument(_))
        ));
        assert!(matches!(
            dijkstra(&graph, "XXX", "A"),
            Err(RoutePlannerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_source_equals_target() {
        let graph = triangle();
        let result = dijkstra(&graph, "A", "A").unwrap();

        assert_eq!(result.path, vec!["A"]);
        assert_eq!(result.total_cost, 0.0);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        // Two equal-cost routes to the target; the tie must break the
        // same way every run
        let mut graph = RouteGraph::new();
        graph.add_edge("A", "B", 1.0).unwrap();
        graph.add_edge("A", "C", 1.0).unwrap();
        graph.add_edge("B", "D", 1.0).unwrap();
        graph.add_edge("C", "D", 1.0).unwrap();

        let first = dijkstra(&graph, "A", "D").unwrap();
        for _ in 0..10 {
            let again = dijkstra(&graph, "A", "D").unwrap();
            assert_eq!(again.path, first.path);
            assert_eq!(again.total_cost, first.total_cost);
        }
    }

    #[test]
    fn test_finds_optimal_path_in_larger_graph() {
        let mut graph = RouteGraph::new();
        graph.add_edge("A", "B", 4.0).unwrap();
        graph.add_edge("A", "C", 2.0).unwrap();
        graph.add_edge("B", "C", 1.0).unwrap();
        graph.add_edge("B", "D", 5.0).unwrap();
        graph.add_edge("C", "D", 8.0).unwrap();
        graph.add_edge("C", "E", 10.0).unwrap();
        graph.add_edge("D", "E", 2.0).unwrap();
        graph.add_edge("D", "F", 6.0).unwrap();
        graph.add_edge("E", "F", 3.0).unwrap();

        let result = dijkstra(&graph, "A", "F").unwrap();

        // A -> C -> B -> D -> E -> F = 2 + 1 + 5 + 2 + 3 = 13
        assert_eq!(result.path, vec!["A", "C", "B", "D", "E", "F"]);
        assert_eq!(result.total_cost, 13.0);
        assert!(result.visited_count <= graph.node_count());
        assert!(result.step_count >= result.visited_count);
    }
}
