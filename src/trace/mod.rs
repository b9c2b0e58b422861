//! Step-trace recorder: an instrumented re-execution of a search that
//! emits a replayable sequence of frontier/visited snapshots for a
//! renderer, independent of the authoritative result in `graph_algos`.
//!
//! The trace is a presentation artifact. Its step cap and per-step
//! expansion limit deliberately bound its length and visual density, so
//! a trace may stop before reaching the target - consult the
//! authoritative search for the real answer whenever `truncated` is set.

use crate::collections::{FxIndexMap, FxIndexSet};
use crate::errors::RoutePlannerError;
use crate::graph::RouteGraph;
use crate::graph_algos::a_star::{Positions, precompute_heuristics};
use crate::graph_algos::dijkstra::ensure_endpoints;

use std::{collections::BinaryHeap, cmp::Ordering};
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;
use serde::Serialize;
use indexmap::map::Entry::{Occupied, Vacant};


/// Bounds on a recorded trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceConfig {
    /// Maximum number of snapshots, counting the initial one. Recording
    /// stops when the cap is hit even if the target was not reached.
    pub step_cap: usize,
    /// Adjacency entries considered per expanded node. A presentation
    /// throttle to keep each step visually legible; it never applies to
    /// the authoritative searches. A trace that misses the target because
    /// entries were dropped by this limit comes back `truncated`.
    pub expansion_limit: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            step_cap: 15,
            expansion_limit: 3,
        }
    }
}


/// One frame of a replayable trace.
///
/// The frontier is captured as it stood *after* the relaxation round of
/// `current`, so nodes discovered by that expansion already appear in
/// the step that introduced them. `h_scores` and `f_scores` are present
/// only for A* traces.
#[derive(Debug, Clone, Serialize)]
pub struct StepSnapshot {
    pub step_index: usize,
    pub current: String,
    /// Finalized nodes, in the order they were finalized
    pub visited: Vec<String>,
    /// Discovered but not yet finalized nodes, in discovery order
    pub frontier: Vec<String>,
    /// Best known cost from the source per discovered node
    pub g_scores: FxIndexMap<String, f64>,
    /// Heuristic estimate per discovered node (A* only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_scores: Option<FxIndexMap<String, f64>>,
    /// g + h per discovered node (A* only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f_scores: Option<FxIndexMap<String, f64>>,
}


/// A finished trace: a fixed array of snapshots with strictly increasing
/// step indices. Replay means re-reading the array from index 0; the
/// recorder never resumes a partially consumed sequence.
#[derive(Debug, Clone, Serialize)]
pub struct StepTrace {
    pub steps: Vec<StepSnapshot>,
    /// Set when recording stopped before the target was finalized for a
    /// throttle reason: the step cap was hit, or the expansion limit
    /// dropped adjacency entries along the way. A frontier that runs dry
    /// with every adjacency entry considered (genuinely unreachable
    /// target) is not truncation.
    pub truncated: bool,
}

impl StepTrace {

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}


/// Record a uniform-cost trace from `source` toward `target`
pub fn trace_dijkstra(
    graph: &RouteGraph,
    source: &str,
    target: &str,
    config: &TraceConfig,
) -> Result<StepTrace, RoutePlannerError> {
    record(graph, source, target, None, config)
}


/// Record a heuristic-guided trace from `source` toward `target`.
/// Heuristics are computed once up front from `positions` (missing
/// positions contribute 0) and echoed into every snapshot.
pub fn trace_a_star(
    graph: &RouteGraph,
    source: &str,
    target: &str,
    positions: &Positions,
    config: &TraceConfig,
) -> Result<StepTrace, RoutePlannerError> {
    let heuristics = precompute_heuristics(graph, target, positions);
    record(graph, source, target, Some(heuristics), config)
}


/// The single recorder behind both trace flavors, parameterized by the
/// precomputed heuristics (None records a Dijkstra trace).
fn record<'a>(
    graph: &'a RouteGraph,
    source: &'a str,
    target: &'a str,
    heuristics: Option<FxHashMap<&'a str, f64>>,
    config: &TraceConfig,
) -> Result<StepTrace, RoutePlannerError> {

    ensure_endpoints(graph, source, target)?;

    let h = |node: &str| -> f64 {
        heuristics
            .as_ref()
            .and_then(|map| map.get(node).copied())
            .unwrap_or(0.0)
    };

    // Same frontier machinery as the authoritative searches, but the
    // node map only needs best costs - a trace reconstructs no path
    let mut open: BinaryHeap<TraceNode> = BinaryHeap::new();
    let mut g_scores: FxIndexMap<&'a str, f64> = FxIndexMap::default();
    let mut visited: FxIndexSet<&'a str> = FxIndexSet::default();
    let mut frontier: FxIndexSet<&'a str> = FxIndexSet::default();

    let source_index = g_scores.insert_full(source, 0.0).0;
    frontier.insert(source);
    open.push(TraceNode {
        index: source_index,
        cost: OrderedFloat(0.0),
        f_cost: OrderedFloat(h(source)),
    });

    let mut steps = Vec::new();

    // Step 0: only the source, cost 0, nothing visited yet. The cap
    // counts this snapshot too, so a zero cap records nothing.
    if config.step_cap > 0 {
        steps.push(make_snapshot(
            0,
            source,
            &visited,
            &frontier,
            &g_scores,
            heuristics.as_ref(),
        ));
    }

    // Adjacency entries beyond the expansion limit are dropped for good;
    // once that happens an exhausted frontier no longer proves the
    // target unreachable, so the trace must be flagged truncated
    let mut dropped_by_limit = false;

    while steps.len() < config.step_cap {

        let Some(TraceNode { index, cost, .. }) = open.pop() else {
            // Frontier exhausted; only truncation if entries were
            // dropped along the way, otherwise the target is unreachable
            break;
        };

        let (&node, &best) = g_scores.get_index(index).unwrap();

        // A better path to this node was already recorded
        if cost.0 > best {
            continue;
        }

        frontier.shift_remove(node);
        visited.insert(node);

        if node == target {
            // Final frame: the target's cost is final, no expansion
            steps.push(make_snapshot(
                steps.len(),
                node,
                &visited,
                &frontier,
                &g_scores,
                heuristics.as_ref(),
            ));
            break;
        }

        // Relax at most expansion_limit adjacency entries, then snapshot -
        // newly discovered nodes show up in the same step
        if graph.neighbors(node).nth(config.expansion_limit).is_some() {
            dropped_by_limit = true;
        }
        for (neighbor, edge_weight) in graph.neighbors(node).take(config.expansion_limit) {
            if visited.contains(neighbor) {
                continue;
            }

            let new_cost = best + edge_weight;

            let neighbor_index = match g_scores.entry(neighbor) {
                Vacant(e) => {
                    let i = e.index();
                    e.insert(new_cost);
                    frontier.insert(neighbor);
                    i
                }
                Occupied(mut e) => {
                    if *e.get() > new_cost {
                        let i = e.index();
                        e.insert(new_cost);
                        i
                    } else {
                        continue;
                    }
                }
            };

            open.push(TraceNode {
                index: neighbor_index,
                cost: OrderedFloat(new_cost),
                f_cost: OrderedFloat(new_cost + h(neighbor)),
            });
        }

        steps.push(make_snapshot(
            steps.len(),
            node,
            &visited,
            &frontier,
            &g_scores,
            heuristics.as_ref(),
        ));
    }

    let truncated =
        !visited.contains(target) && (steps.len() >= config.step_cap || dropped_by_limit);

    tracing::debug!(
        source,
        target,
        steps = steps.len(),
        truncated,
        "trace recorded"
    );

    Ok(StepTrace { steps, truncated })
}


fn make_snapshot(
    step_index: usize,
    current: &str,
    visited: &FxIndexSet<&str>,
    frontier: &FxIndexSet<&str>,
    g_scores: &FxIndexMap<&str, f64>,
    heuristics: Option<&FxHashMap<&str, f64>>,
) -> StepSnapshot {

    let g: FxIndexMap<String, f64> = g_scores
        .iter()
        .map(|(node, cost)| ((*node).to_string(), *cost))
        .collect();

    // h and f cover the discovered nodes, mirroring g
    let (h_scores, f_scores) = match heuristics {
        Some(map) => {
            let mut h_out = FxIndexMap::default();
            let mut f_out = FxIndexMap::default();
            for (node, cost) in g_scores {
                let h = map.get(node).copied().unwrap_or(0.0);
                h_out.insert((*node).to_string(), h);
                f_out.insert((*node).to_string(), cost + h);
            }
            (Some(h_out), Some(f_out))
        }
        None => (None, None),
    };

    StepSnapshot {
        step_index,
        current: current.to_string(),
        visited: visited.iter().map(|node| (*node).to_string()).collect(),
        frontier: frontier.iter().map(|node| (*node).to_string()).collect(),
        g_scores: g,
        h_scores,
        f_scores,
    }
}


/// Open-list entry, ordered like the authoritative searches: lowest
/// f_cost first, lower map index among ties
#[derive(Debug)]
struct TraceNode {
    index: usize,
    cost: OrderedFloat<f64>,
    f_cost: OrderedFloat<f64>,
}

impl Ord for TraceNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl PartialOrd for TraceNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for TraceNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.index == other.index
    }
}
impl Eq for TraceNode {}
