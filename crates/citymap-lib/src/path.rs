use serde::Serialize;
use tracing::trace;

use crate::graph::{Graph, NodeId};

/// Shortest road route between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadRoute {
    /// Total edge weight along the route, in meters.
    pub distance: f64,
    /// Node identifiers from start to goal, both included.
    pub nodes: Vec<NodeId>,
}

impl RoadRoute {
    /// Number of edges travelled.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Length of the shortest directed road route from `start` to `goal`.
///
/// Returns `None` when the goal is unreachable, when either node is absent,
/// or when the graph is empty.
pub fn shortest_distance<P, L>(graph: &Graph<P, L>, start: NodeId, goal: NodeId) -> Option<f64> {
    shortest_route(graph, start, goal).map(|route| route.distance)
}

/// Run Dijkstra's algorithm from `start`, stopping as soon as `goal` settles.
///
/// Each round picks the closest unvisited node with a linear scan, so a search
/// is O(V²) plus an O(V) id lookup per relaxed edge. Edge weights are expected
/// to be non-negative; the loader coerces NaN distances to zero.
pub fn shortest_route<P, L>(graph: &Graph<P, L>, start: NodeId, goal: NodeId) -> Option<RoadRoute> {
    let start_index = graph.index_of(start)?;
    let goal_index = graph.index_of(goal)?;

    let count = graph.node_count();
    let mut distances = vec![f64::INFINITY; count];
    let mut parents: Vec<Option<usize>> = vec![None; count];
    let mut visited = vec![false; count];
    distances[start_index] = 0.0;

    while let Some(current) = closest_unvisited(&distances, &visited) {
        visited[current] = true;
        if current == goal_index {
            break;
        }

        let Some(node) = graph.node_at(current) else {
            continue;
        };
        trace!(node = node.id(), distance = distances[current], "settled");

        for edge in node.edges() {
            let Some(next) = graph.index_of(edge.target) else {
                continue;
            };
            if visited[next] {
                continue;
            }

            let candidate = distances[current] + edge.weight;
            if candidate < distances[next] {
                distances[next] = candidate;
                parents[next] = Some(current);
            }
        }
    }

    if !visited[goal_index] {
        return None;
    }

    Some(RoadRoute {
        distance: distances[goal_index],
        nodes: reconstruct_path(graph, &parents, goal_index),
    })
}

fn closest_unvisited(distances: &[f64], visited: &[bool]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, (&distance, &done)) in distances.iter().zip(visited).enumerate() {
        if done || distance == f64::INFINITY {
            continue;
        }
        if best.map_or(true, |current| distance < distances[current]) {
            best = Some(index);
        }
    }
    best
}

fn reconstruct_path<P, L>(graph: &Graph<P, L>, parents: &[Option<usize>], goal: usize) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(index) = current {
        if let Some(node) = graph.node_at(index) {
            path.push(node.id());
        }
        current = parents[index];
    }
    path.reverse();
    path
}
