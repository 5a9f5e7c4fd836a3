use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{Graph, GraphError};
use crate::query::{CityMap, Place};
use crate::validate::{read_records, validate, PoiRecord, RecordSink, RoadRecord};

/// Validate and load a city map from a rewindable reader.
///
/// The input is read twice: once by the validator and, only when it passes,
/// once more from the start to populate the graph. Nothing is built for an
/// invalid input; the error carries the first offending line.
///
/// Road records create their endpoints on demand. A missing `from` node
/// becomes an intersection at the road line's coordinate; a missing `to` node
/// is created without a payload. Each road adds a single directed edge
/// `from -> to`, and a second road for the same ordered pair is dropped.
/// Edge weights are the road lengths rounded to `f32` precision.
pub fn load_city_map<R: BufRead + Seek>(mut reader: R) -> Result<CityMap> {
    if let Err(err) = validate(&mut reader) {
        debug!(error = %err, "input rejected by validator");
        return Err(err);
    }
    reader.rewind()?;

    let mut builder = GraphBuilder::default();
    read_records(&mut reader, &mut builder)?;

    let graph = builder.graph;
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "city map loaded"
    );
    Ok(CityMap::new(graph))
}

/// Open `path` and load it with [`load_city_map`].
pub fn load_city_map_from_path(path: &Path) -> Result<CityMap> {
    let file = File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loading city map");
    load_city_map(BufReader::new(file))
}

#[derive(Default)]
struct GraphBuilder {
    graph: Graph<Place, String>,
}

impl RecordSink for GraphBuilder {
    fn poi(&mut self, line: usize, record: PoiRecord<'_>) -> Result<()> {
        let place = Place::Poi {
            name: record.name.to_string(),
            coordinate: record.coordinate,
        };
        match self.graph.add_node(record.id, Some(place)) {
            Ok(_) => Ok(()),
            Err(GraphError::DuplicateNode { id }) => {
                warn!(line, id, "duplicate POI id; keeping the first definition");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn road(&mut self, line: usize, record: RoadRecord<'_>) -> Result<()> {
        // Road lengths are kept at single precision; sums stay in f64.
        let distance = if record.distance.is_nan() {
            0.0
        } else {
            f64::from(record.distance as f32)
        };

        if !self.graph.contains(record.from) {
            let place = Place::Intersection {
                coordinate: record.coordinate,
            };
            self.graph.add_node(record.from, Some(place))?;
        }
        if !self.graph.contains(record.to) {
            self.graph.add_node(record.to, None)?;
        }

        match self
            .graph
            .add_edge(record.from, record.to, distance, record.name.to_string())
        {
            Ok(_) => Ok(()),
            Err(GraphError::DuplicateEdge { from, to }) => {
                debug!(line, from, to, "duplicate road dropped");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
