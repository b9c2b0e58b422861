use thiserror::Error;


/// Errors surfaced by the route planning engine
/// "No path exists" and "trace truncated" are expected outcomes, not errors:
/// an unreachable target is reported as an empty path with infinite cost, and
/// a capped trace carries a `truncated` flag on the returned sequence.
#[derive(Debug, Error, PartialEq)]
pub enum RoutePlannerError {
    /// Missing/empty node identifier, or an endpoint absent at search time
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Negative or non-finite edge weight; the edge is not inserted
    #[error("invalid edge weight: {0}")]
    InvalidWeight(f64),
}
