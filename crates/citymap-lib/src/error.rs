use std::path::PathBuf;

use thiserror::Error;

use crate::graph::GraphError;
use crate::validate::FormatError;

/// Convenient result alias for the city map library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The input does not follow the POI/road line grammar.
    #[error(transparent)]
    InvalidFormat(#[from] FormatError),

    /// A graph store operation was rejected.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The map file could not be opened.
    #[error("cannot open file {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised when a location name could not be found among the POIs.
    #[error("unknown location name: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when no road route connects two locations.
    #[error("no path found between {start} and {goal}")]
    NoPath { start: String, goal: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Line number of the first offending input line, when this is a format error.
    pub fn format_line(&self) -> Option<usize> {
        match self {
            Error::InvalidFormat(err) => Some(err.line),
            _ => None,
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
