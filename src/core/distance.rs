use std::collections::{HashMap, VecDeque};

use crate::core::graph::WishGraph;

/// Hop count from `source` to every reachable node, `source` included at 0
///
/// Returns an empty map if `source` is not in the graph.
pub fn bfs_distances<'a>(graph: &'a WishGraph, source: &str) -> HashMap<&'a str, usize> {
    let mut distances = HashMap::new();
    let Some(start) = graph.nodes().find(|n| *n == source) else {
        return distances;
    };

    let mut queue = VecDeque::new();
    distances.insert(start, 0);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let next = distances[current] + 1;
        for neighbor in graph.neighbors(current) {
            if !distances.contains_key(neighbor) {
                distances.insert(neighbor, next);
                queue.push_back(neighbor);
            }
        }
    }

    distances
}

/// Every node reachable from `source`, nearest first, ties broken by name
///
/// `source` itself and nodes in other components are left out.
pub fn rank_by_distance(graph: &WishGraph, source: &str) -> Vec<String> {
    let mut reachable: Vec<(usize, &str)> = bfs_distances(graph, source)
        .into_iter()
        .filter(|(name, _)| *name != source)
        .map(|(name, distance)| (distance, name))
        .collect();

    reachable.sort_unstable();
    reachable.into_iter().map(|(_, name)| name.to_string()).collect()
}
