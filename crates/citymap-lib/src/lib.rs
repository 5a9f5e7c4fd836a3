//! City map library entry points.
//!
//! This crate validates tab-delimited POI/road files, loads them into an
//! in-memory directed graph, and answers location, diameter, straight-line
//! and road-distance queries. Higher-level consumers (the CLI tools) should
//! only depend on the functions exported here instead of reimplementing
//! behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod geo;
pub mod graph;
pub mod loader;
pub mod output;
pub mod path;
pub mod query;
pub mod scan;
pub mod validate;

pub use error::{Error, Result};
pub use geo::{haversine_distance, Coordinate, EARTH_RADIUS_METERS};
pub use graph::{Edge, Graph, GraphError, Node, NodeId};
pub use loader::{load_city_map, load_city_map_from_path};
pub use output::{render_graph, QueryOutcome};
pub use path::{shortest_distance, shortest_route, RoadRoute};
pub use query::{CityMap, Diameter, Place, PoiSummary};
pub use validate::{validate, FormatError, Violation};
