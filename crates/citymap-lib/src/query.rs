//! Read-only queries over a loaded city map.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geo::Coordinate;
use crate::graph::{Graph, NodeId};
use crate::path::{shortest_route, RoadRoute};

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Number of suggestions attached to an unknown-location error.
const MAX_SUGGESTIONS: usize = 3;

/// Payload stored on a city map node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Place {
    /// Named point of interest from the POI section.
    Poi { name: String, coordinate: Coordinate },
    /// Unnamed road endpoint positioned by the road line that introduced it.
    Intersection { coordinate: Coordinate },
}

impl Place {
    pub fn name(&self) -> Option<&str> {
        match self {
            Place::Poi { name, .. } => Some(name.as_str()),
            Place::Intersection { .. } => None,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        match self {
            Place::Poi { coordinate, .. } | Place::Intersection { coordinate } => *coordinate,
        }
    }
}

/// Named POI as reported by query results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoiSummary {
    pub id: NodeId,
    pub name: String,
    pub coordinate: Coordinate,
}

/// The two named POIs furthest apart in a straight line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diameter {
    pub first: PoiSummary,
    pub second: PoiSummary,
    /// Haversine distance between the two POIs, in meters.
    pub distance: f64,
}

/// A loaded city map: the road graph plus name-based queries over its POIs.
///
/// Name lookups scan the nodes in insertion order and return the first POI
/// with an exactly matching name.
#[derive(Debug, Clone, Default)]
pub struct CityMap {
    graph: Graph<Place, String>,
}

impl CityMap {
    pub fn new(graph: Graph<Place, String>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &Graph<Place, String> {
        &self.graph
    }

    pub fn into_graph(self) -> Graph<Place, String> {
        self.graph
    }

    /// Named POIs in node order.
    pub fn pois(&self) -> impl Iterator<Item = PoiSummary> + '_ {
        self.graph.nodes().filter_map(|node| match node.payload() {
            Some(Place::Poi { name, coordinate }) => Some(PoiSummary {
                id: node.id(),
                name: name.clone(),
                coordinate: *coordinate,
            }),
            _ => None,
        })
    }

    fn poi_by_name(&self, name: &str) -> Option<(NodeId, Coordinate)> {
        self.graph.nodes().find_map(|node| match node.payload() {
            Some(Place::Poi {
                name: candidate,
                coordinate,
            }) if candidate == name => Some((node.id(), *coordinate)),
            _ => None,
        })
    }

    /// Lookup a POI node identifier by its case-sensitive name.
    pub fn node_id_by_name(&self, name: &str) -> Option<NodeId> {
        self.poi_by_name(name).map(|(id, _)| id)
    }

    fn resolve(&self, name: &str) -> Result<(NodeId, Coordinate)> {
        self.poi_by_name(name)
            .ok_or_else(|| Error::UnknownLocation {
                name: name.to_string(),
                suggestions: self.suggest_names(name, MAX_SUGGESTIONS),
            })
    }

    /// Coordinates of the POI called `name`.
    pub fn find_location(&self, name: &str) -> Result<Coordinate> {
        self.resolve(name).map(|(_, coordinate)| coordinate)
    }

    /// Largest straight-line distance between two named POIs.
    ///
    /// Pairs are visited in node order and only a strictly larger distance
    /// replaces the current best, so ties keep the first pair. The search
    /// starts from zero, so POIs that all share one point have no diameter.
    /// Intersections never take part. `None` when the map holds fewer than
    /// two POIs.
    pub fn find_diameter(&self) -> Option<Diameter> {
        let pois: Vec<PoiSummary> = self.pois().collect();
        let mut best: Option<(usize, usize, f64)> = None;

        for (i, first) in pois.iter().enumerate() {
            for (j, second) in pois.iter().enumerate().skip(i + 1) {
                let distance = first.coordinate.distance_to(&second.coordinate);
                let longest = best.map_or(0.0, |(_, _, longest)| longest);
                if distance > longest {
                    best = Some((i, j, distance));
                }
            }
        }

        let (i, j, distance) = best?;
        Some(Diameter {
            first: pois[i].clone(),
            second: pois[j].clone(),
            distance,
        })
    }

    /// Straight-line distance between two named POIs, in meters.
    pub fn distance_between(&self, first: &str, second: &str) -> Result<f64> {
        let (_, a) = self.resolve(first)?;
        let (_, b) = self.resolve(second)?;
        Ok(a.distance_to(&b))
    }

    /// Shortest route along directed roads between two named POIs.
    pub fn road_distance(&self, start: &str, goal: &str) -> Result<RoadRoute> {
        let (start_id, _) = self.resolve(start)?;
        let (goal_id, _) = self.resolve(goal)?;
        shortest_route(&self.graph, start_id, goal_id).ok_or_else(|| Error::NoPath {
            start: start.to_string(),
            goal: goal.to_string(),
        })
    }

    /// POI names similar to `name`, most similar first.
    pub fn suggest_names(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, String)> = self
            .pois()
            .map(|poi| (strsim::jaro_winkler(name, &poi.name), poi.name))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored.dedup_by(|a, b| a.1 == b.1);
        scored.truncate(limit);
        scored.into_iter().map(|(_, name)| name).collect()
    }
}
