use crate::errors::RoutePlannerError;
use crate::geometry::Point;
use crate::graph::RouteGraph;
use super::{NodeMap, SearchResult, shortest_path};
use super::dijkstra::ensure_endpoints;

use std::{collections::BinaryHeap, cmp::Ordering};
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;
use indexmap::map::Entry::{Occupied, Vacant};


/// Layout-space coordinates per node id, supplied by the presentation
/// layer. These are schematic screen/grid positions, not geographic ones.
pub type Positions = FxHashMap<String, Point>;


/// Frontier entry on the A* open list
/// Ordered by f_cost (cost + heuristic), reversed for the max-heap, with
/// the lower map index winning among equal f_costs
#[derive(Debug)]
struct OpenNode {
    index: usize, // index in the node map - identifies the node
    cost: OrderedFloat<f64>, // confirmed cost to reach this node
    f_cost: OrderedFloat<f64>, // cost + heuristic estimate
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.index == other.index
    }
}
impl Eq for OpenNode {}


/// Find the shortest path between two airports using the A* algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
///
/// Same control structure as Dijkstra, but the frontier is ordered by
/// `f = g + h` where `h` is the straight-line distance to the target in
/// layout space. A node without a position gets `h = 0`, degrading to
/// Dijkstra-equivalent behavior for that node rather than failing.
///
/// Optimality requires the heuristic to be admissible - layout distances
/// must never overestimate the true remaining cost. This is a
/// precondition on the supplied positions, not something the search
/// enforces.
pub fn a_star<'a>(
    graph: &'a RouteGraph,
    source: &'a str,
    target: &'a str,
    positions: &Positions,
) -> Result<SearchResult, RoutePlannerError> {

    ensure_endpoints(graph, source, target)?;

    // The target is fixed for the duration of the search, so every
    // node's heuristic is computed once up front
    let heuristics = precompute_heuristics(graph, target, positions);
    let h = |node: &str| heuristics.get(node).copied().unwrap_or(0.0);

    // Open list - nodes to evaluate, cheapest estimated total first
    let mut open_list: BinaryHeap<OpenNode> = BinaryHeap::new();

    // Discovered nodes with their best known (parent_index, cost)
    let mut node_map: NodeMap<'a> = NodeMap::default();

    let source_index = node_map.insert_full(source, (usize::MAX, 0.0)).0;
    open_list.push(OpenNode {
        index: source_index,
        cost: OrderedFloat(0.0),
        f_cost: OrderedFloat(h(source)),
    });

    let mut visited_count = 0;
    let mut step_count = 0;

    while let Some(OpenNode { index, cost, .. }) = open_list.pop() {
        step_count += 1;

        // fetch current best cost for node
        let (&node, &(_, best)) = node_map.get_index(index).unwrap();

        // A better path to this node was already found
        if cost.0 > best {
            continue;
        }
        visited_count += 1;

        if node == target {
            let path = shortest_path(&node_map, index);
            tracing::debug!(
                source,
                target,
                total_cost = best,
                visited_count,
                "a_star reached target"
            );
            return Ok(SearchResult {
                path,
                total_cost: best,
                visited_count,
                step_count,
            });
        }

        for (neighbor, edge_weight) in graph.neighbors(node) {

            // Confirmed cost, not heuristic
            let new_cost = best + edge_weight;

            let neighbor_index = match node_map.entry(neighbor) {
                Vacant(e) => {
                    let i = e.index();
                    e.insert((index, new_cost));
                    i
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        let i = e.index();
                        e.insert((index, new_cost));
                        i
                    } else {
                        continue;
                    }
                }
            };

            open_list.push(OpenNode {
                index: neighbor_index,
                cost: OrderedFloat(new_cost),
                f_cost: OrderedFloat(new_cost + h(neighbor)),
            });
        }
    }

    tracing::debug!(source, target, visited_count, "a_star exhausted frontier");
    Ok(SearchResult::unreachable(visited_count, step_count))
}


/// Heuristic per graph node: straight-line distance to the target in
/// layout space, 0 wherever a position is missing (including the case
/// of an unplaced target, which reduces the whole search to Dijkstra)
pub(crate) fn precompute_heuristics<'a>(
    graph: &'a RouteGraph,
    target: &str,
    positions: &Positions,
) -> FxHashMap<&'a str, f64> {
    let target_position = positions.get(target);

    graph
        .nodes()
        .map(|node| {
            let h = match (positions.get(node), target_position) {
                (Some(position), Some(goal)) => position.distance_to(goal),
                _ => 0.0,
            };
            (node, h)
        })
        .collect()
}
