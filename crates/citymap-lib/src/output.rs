use std::fmt::Write;

use serde::Serialize;

use crate::geo::Coordinate;
use crate::graph::Graph;
use crate::path::RoadRoute;
use crate::query::{Diameter, Place};

/// Structured result of a single successful query, ready to serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum QueryOutcome {
    Location {
        name: String,
        coordinate: Coordinate,
    },
    Diameter {
        #[serde(skip_serializing_if = "Option::is_none")]
        diameter: Option<Diameter>,
    },
    Distance {
        from: String,
        to: String,
        meters: f64,
    },
    RoadDistance {
        from: String,
        to: String,
        meters: f64,
        route: RoadRoute,
    },
}

impl QueryOutcome {
    /// Query label used in textual renderings and logs.
    pub fn label(&self) -> &'static str {
        match self {
            QueryOutcome::Location { .. } => "location",
            QueryOutcome::Diameter { .. } => "diameter",
            QueryOutcome::Distance { .. } => "distance",
            QueryOutcome::RoadDistance { .. } => "road_distance",
        }
    }
}

/// Render every node with its payload and outgoing roads.
///
/// ```text
/// Node 1: Memorial Union (42.0239, -93.6458)
///   -> Node 2 (weight: 350.0, Lincoln Way)
/// Node 2: intersection (42.0250, -93.6500)
///   (no outgoing edges)
/// ```
pub fn render_graph(graph: &Graph<Place, String>) -> String {
    let mut buffer = String::new();
    for node in graph.nodes() {
        match node.payload() {
            Some(Place::Poi { name, coordinate }) => {
                let _ = writeln!(
                    buffer,
                    "Node {}: {} ({:.4}, {:.4})",
                    node.id(),
                    name,
                    coordinate.latitude,
                    coordinate.longitude
                );
            }
            Some(Place::Intersection { coordinate }) => {
                let _ = writeln!(
                    buffer,
                    "Node {}: intersection ({:.4}, {:.4})",
                    node.id(),
                    coordinate.latitude,
                    coordinate.longitude
                );
            }
            None => {
                let _ = writeln!(buffer, "Node {}: (no data)", node.id());
            }
        }

        if node.edges().is_empty() {
            let _ = writeln!(buffer, "  (no outgoing edges)");
        }
        for edge in node.edges() {
            let _ = writeln!(
                buffer,
                "  -> Node {} (weight: {:.1}, {})",
                edge.target, edge.weight, edge.label
            );
        }
    }
    buffer
}
