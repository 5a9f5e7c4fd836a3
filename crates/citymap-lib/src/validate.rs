//! Strict validator for the POI/road file grammar.
//!
//! ```text
//! N                                   POI count, N > 0
//! id \t name \t lat \t lon            N lines
//! M                                   road count, M > 0
//! from \t to \t dist \t lat \t lon \t road name   M lines
//! ```
//!
//! Validation stops at the first offending line and reports its 1-based
//! number. The same [`read_records`] pass drives the loader, so a file that
//! validates is parsed with exactly the same rules the second time around.

use std::fmt;
use std::io::BufRead;

use thiserror::Error;
use tracing::debug;

use crate::error::Result;
use crate::geo::Coordinate;
use crate::graph::NodeId;
use crate::scan::{parse_id, scan_count, scan_poi, scan_road};

/// Rule broken by an offending line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Input ended before the declared number of lines.
    UnexpectedEnd,
    /// A count line did not start with an integer.
    InvalidCount,
    /// A count line held zero or a negative number.
    NonPositiveCount,
    /// An empty or whitespace-only record line.
    BlankLine,
    /// Fewer fields scanned than the record needs.
    MissingFields { expected: usize, found: usize },
    /// An identifier with a non-digit character.
    InvalidId,
    LatitudeOutOfRange,
    LongitudeOutOfRange,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnexpectedEnd => f.write_str("unexpected end of input"),
            Violation::InvalidCount => f.write_str("count is not an integer"),
            Violation::NonPositiveCount => f.write_str("count must be positive"),
            Violation::BlankLine => f.write_str("blank line"),
            Violation::MissingFields { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            Violation::InvalidId => f.write_str("identifier must be all digits"),
            Violation::LatitudeOutOfRange => f.write_str("latitude outside [-90, 90]"),
            Violation::LongitudeOutOfRange => f.write_str("longitude outside [-180, 180]"),
        }
    }
}

/// First offending line of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid file format at line {line}: {violation}")]
pub struct FormatError {
    /// 1-based line number.
    pub line: usize,
    pub violation: Violation,
}

impl FormatError {
    fn new(line: usize, violation: Violation) -> Self {
        Self { line, violation }
    }
}

/// Check `reader` against the file grammar without building anything.
///
/// Returns `Ok(())` for a valid input, [`crate::Error::InvalidFormat`] with
/// the first offending line otherwise. Read failures surface as
/// [`crate::Error::Io`].
pub fn validate<R: BufRead>(reader: R) -> Result<()> {
    read_records(reader, &mut Discard)
}

/// A validated POI line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PoiRecord<'a> {
    pub id: NodeId,
    pub name: &'a str,
    pub coordinate: Coordinate,
}

/// A validated road line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RoadRecord<'a> {
    pub from: NodeId,
    pub to: NodeId,
    pub distance: f64,
    pub coordinate: Coordinate,
    pub name: &'a str,
}

/// Receives records in file order as [`read_records`] accepts them.
pub(crate) trait RecordSink {
    fn poi(&mut self, line: usize, record: PoiRecord<'_>) -> Result<()>;
    fn road(&mut self, line: usize, record: RoadRecord<'_>) -> Result<()>;
}

struct Discard;

impl RecordSink for Discard {
    fn poi(&mut self, _line: usize, _record: PoiRecord<'_>) -> Result<()> {
        Ok(())
    }

    fn road(&mut self, _line: usize, _record: RoadRecord<'_>) -> Result<()> {
        Ok(())
    }
}

/// Walk the whole grammar once, top to bottom, handing each accepted record
/// to `sink`. Lines after the last declared road are never read.
pub(crate) fn read_records<R: BufRead, S: RecordSink>(reader: R, sink: &mut S) -> Result<()> {
    let mut lines = Lines::new(reader);

    let poi_count = read_count(&mut lines)?;
    for _ in 0..poi_count {
        let line = lines.expect_next()?;
        let record = parse_poi(&line).map_err(|violation| lines.error(violation))?;
        sink.poi(lines.number, record)?;
    }

    let road_count = read_count(&mut lines)?;
    for _ in 0..road_count {
        let line = lines.expect_next()?;
        let record = parse_road(&line).map_err(|violation| lines.error(violation))?;
        sink.road(lines.number, record)?;
    }

    debug!(
        pois = poi_count,
        roads = road_count,
        lines = lines.number,
        "input matches grammar"
    );
    Ok(())
}

fn read_count<R: BufRead>(lines: &mut Lines<R>) -> Result<u64> {
    let line = lines.expect_next()?;
    let count = scan_count(&line).ok_or_else(|| lines.error(Violation::InvalidCount))?;
    if count <= 0 {
        return Err(lines.error(Violation::NonPositiveCount).into());
    }
    Ok(count.unsigned_abs())
}

fn parse_poi(line: &str) -> std::result::Result<PoiRecord<'_>, Violation> {
    if is_blank(line) {
        return Err(Violation::BlankLine);
    }

    let fields = scan_poi(line);
    if fields.fields != 4 {
        return Err(Violation::MissingFields {
            expected: 4,
            found: fields.fields,
        });
    }
    let id = parse_id(fields.id).ok_or(Violation::InvalidId)?;
    if !(-90.0..=90.0).contains(&fields.latitude) {
        return Err(Violation::LatitudeOutOfRange);
    }
    if !(-180.0..=180.0).contains(&fields.longitude) {
        return Err(Violation::LongitudeOutOfRange);
    }

    Ok(PoiRecord {
        id,
        name: fields.name,
        coordinate: Coordinate::new(fields.latitude, fields.longitude),
    })
}

fn parse_road(line: &str) -> std::result::Result<RoadRecord<'_>, Violation> {
    if is_blank(line) {
        return Err(Violation::BlankLine);
    }

    let fields = scan_road(line);
    if fields.fields != 6 {
        return Err(Violation::MissingFields {
            expected: 6,
            found: fields.fields,
        });
    }
    let from = parse_id(fields.from).ok_or(Violation::InvalidId)?;
    let to = parse_id(fields.to).ok_or(Violation::InvalidId)?;

    Ok(RoadRecord {
        from,
        to,
        distance: fields.distance,
        coordinate: Coordinate::new(fields.latitude, fields.longitude),
        name: fields.name,
    })
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Line reader that keeps the 1-based number of the last line it returned.
struct Lines<R> {
    reader: R,
    buf: Vec<u8>,
    number: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            number: 0,
        }
    }

    /// Next line including its terminator; a missing line is reported at the
    /// position it should have occupied.
    fn expect_next(&mut self) -> Result<String> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Err(FormatError::new(self.number + 1, Violation::UnexpectedEnd).into());
        }
        self.number += 1;
        Ok(String::from_utf8_lossy(&self.buf).into_owned())
    }

    fn error(&self, violation: Violation) -> FormatError {
        FormatError::new(self.number, violation)
    }
}
