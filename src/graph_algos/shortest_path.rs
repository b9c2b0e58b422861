use super::NodeMap;

/// Construct the shortest path from the goal node back to the source.
/// Returns the ordered path as a vector of node ids from source to goal.
/// Every parent index in the map was produced by the same search, so the
/// walk always terminates at the source's usize::MAX sentinel.
pub(crate) fn shortest_path(node_map: &NodeMap<'_>, goal_index: usize) -> Vec<String> {

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to source
    while current_index != usize::MAX {
        let Some((node, &(parent_index, _))) = node_map.get_index(current_index) else {
            break;
        };
        path.push((*node).to_string());
        current_index = parent_index;
    }

    // The path is in reverse order, so reverse it
    path.reverse();

    path
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::FxIndexMap;

    #[test]
    fn test_path_reconstruction() {
        let mut node_map: NodeMap = FxIndexMap::default();

        let a = node_map.insert_full("JFK", (usize::MAX, 0.0)).0;
        let b = node_map.insert_full("ORD", (a, 700.0)).0;
        let c = node_map.insert_full("DEN", (a, 1600.0)).0;
        let d = node_map.insert_full("SFO", (c, 3100.0)).0;

        assert_eq!(shortest_path(&node_map, d), vec!["JFK", "DEN", "SFO"]);
        assert_eq!(shortest_path(&node_map, b), vec!["JFK", "ORD"]);
        assert_eq!(shortest_path(&node_map, a), vec!["JFK"]);
    }
}
