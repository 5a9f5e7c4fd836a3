//! Common test utilities and fixture helpers.
//!
//! This module provides shared test infrastructure for integration tests,
//! including the campus fixture, in-memory parsing, and temporary map files.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use citymap_lib::{load_city_map, load_city_map_from_path, CityMap, Result};
use tempfile::NamedTempFile;

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the four-POI campus fixture.
#[allow(dead_code)]
pub fn fixture_path() -> PathBuf {
    fixtures_dir().join("ames_campus.tsv")
}

/// Load the campus fixture.
#[allow(dead_code)]
pub fn fixture_map() -> CityMap {
    load_city_map_from_path(&fixture_path()).expect("fixture loads")
}

/// Load a city map from in-memory text.
#[allow(dead_code)]
pub fn parse(contents: &str) -> Result<CityMap> {
    load_city_map(Cursor::new(contents.as_bytes()))
}

/// Write `contents` to a temporary file that lives as long as the handle.
#[allow(dead_code)]
pub fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
