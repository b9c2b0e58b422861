//! skyroute - shortest path engine for airport route networks
//!
//! The crate owns the computation behind an interactive route explorer:
//! an undirected weighted graph of airports, a policy that folds a
//! route's distance, delay and service frequency into a single scalar
//! weight, two authoritative shortest-path searches (Dijkstra and A*),
//! and a step-trace recorder that re-executes a search to emit a
//! replayable sequence of frontier/visited snapshots for a renderer.
//!
//! Rendering, editing and persistence live outside this crate; its only
//! boundary is the call contract below. Every call is a bounded,
//! synchronous computation with no I/O and no internal locking - share
//! a `&RouteGraph` across tasks freely as long as nothing mutates it
//! concurrently, which the borrow checker already enforces for safe code.
//!
//! ```
//! use skyroute::{RouteGraph, WeightPolicy, dijkstra};
//!
//! let policy = WeightPolicy::default();
//! let mut graph = RouteGraph::new();
//! graph.add_edge("JFK", "ORD", policy.weight(1200.0, 0.0, 4))?;
//! graph.add_edge("ORD", "DFW", policy.weight(1300.0, 0.0, 5))?;
//! graph.add_edge("JFK", "DFW", policy.weight(2200.0, 0.0, 2))?;
//!
//! let result = dijkstra(&graph, "JFK", "DFW")?;
//! assert_eq!(result.path, vec!["JFK", "ORD", "DFW"]);
//! # Ok::<(), skyroute::RoutePlannerError>(())
//! ```

mod collections;

pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod routes;
pub mod trace;

pub use errors::RoutePlannerError;
pub use geometry::Point;
pub use graph::RouteGraph;
pub use graph_algos::SearchResult;
pub use graph_algos::a_star::{Positions, a_star};
pub use graph_algos::dijkstra::dijkstra;
pub use routes::{RouteRecord, WeightPolicy, build_route_graph};
pub use trace::{StepSnapshot, StepTrace, TraceConfig, trace_a_star, trace_dijkstra};
