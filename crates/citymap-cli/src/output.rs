//! Output formatting for query results.
//!
//! Text output keeps one line per query with fixed decimal precision so the
//! results stay easy to diff. JSON output writes one compact object per line.

use std::io::{self, Write};

use clap::ValueEnum;

use citymap_lib::{Error as LibError, QueryOutcome};

use crate::queries::Query;

/// Output format for query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain numbers, one line per query.
    #[default]
    Text,
    /// One JSON object per query.
    Json,
}

impl OutputFormat {
    pub fn render<W: Write>(self, out: &mut W, outcome: &QueryOutcome) -> io::Result<()> {
        match self {
            OutputFormat::Text => render_text(out, outcome),
            OutputFormat::Json => render_json(out, outcome),
        }
    }
}

/// Write the plain-text rendering of `outcome`.
///
/// A diameter query on a map with fewer than two POIs writes nothing.
pub fn render_text<W: Write>(out: &mut W, outcome: &QueryOutcome) -> io::Result<()> {
    match outcome {
        QueryOutcome::Location { coordinate, .. } => {
            writeln!(out, "{:.4} {:.4}", coordinate.latitude, coordinate.longitude)
        }
        QueryOutcome::Diameter { diameter: None } => Ok(()),
        QueryOutcome::Diameter {
            diameter: Some(diameter),
        } => {
            let first = diameter.first.coordinate;
            let second = diameter.second.coordinate;
            writeln!(
                out,
                "{:.4} {:.4} {:.4} {:.4} {:.2}",
                first.latitude,
                first.longitude,
                second.latitude,
                second.longitude,
                diameter.distance
            )
        }
        QueryOutcome::Distance { meters, .. } | QueryOutcome::RoadDistance { meters, .. } => {
            writeln!(out, "{meters:.3}")
        }
    }
}

/// Write `outcome` as a single-line JSON object.
pub fn render_json<W: Write>(out: &mut W, outcome: &QueryOutcome) -> io::Result<()> {
    serde_json::to_writer(&mut *out, outcome)?;
    writeln!(out)
}

/// Diagnostic line reported on stderr when `query` fails with `error`.
pub fn failure_message(query: &Query, error: &LibError) -> String {
    match (query, error) {
        (Query::Location(_), LibError::UnknownLocation { name, suggestions }) => format!(
            "Error: Location '{name}' not found{}",
            suggestion_hint(suggestions)
        ),
        (_, LibError::UnknownLocation { suggestions, .. }) => format!(
            "Error: One or both locations not found{}",
            suggestion_hint(suggestions)
        ),
        (_, LibError::NoPath { .. }) => "Error: No path found between locations".to_string(),
        (_, other) => format!("Error: {other}"),
    }
}

fn suggestion_hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }
    let quoted: Vec<String> = suggestions.iter().map(|name| format!("'{name}'")).collect();
    format!(" (did you mean {}?)", quoted.join(", "))
}
