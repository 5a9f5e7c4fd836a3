use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser};
use tracing::{debug, info};

use citymap_cli::init_tracing;
use citymap_cli::output::{failure_message, OutputFormat};
use citymap_cli::queries::{normalize_legacy_flags, Query, QueryArgs, Response};
use citymap_lib::{load_city_map_from_path, CityMap, Error as LibError};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Query points of interest and roads in a city map",
    after_help = "Single-dash spellings such as -location and -roaddist are accepted too."
)]
struct Cli {
    /// Tab-delimited city map file to load.
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: PathBuf,

    /// Output format for query results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(flatten)]
    queries: QueryArgs,
}

fn main() -> Result<()> {
    init_tracing();
    let matches = Cli::command().get_matches_from(normalize_legacy_flags(std::env::args_os()));
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    let map = load(&cli.file)?;
    info!(
        nodes = map.graph().node_count(),
        roads = map.graph().edge_count(),
        "loaded city map from {}",
        cli.file.display()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for query in cli.queries.ordered(&matches) {
        handle_query(&mut out, &map, &query, cli.format)?;
    }
    out.flush().context("failed to flush query output")?;
    Ok(())
}

fn load(path: &Path) -> Result<CityMap> {
    load_city_map_from_path(path).map_err(|err| {
        let message = match (&err, err.format_line()) {
            (_, Some(line)) => format!("Invalid file format at line {line}"),
            (LibError::FileOpen { path, .. }, None) => {
                format!("Cannot open file {}", path.display())
            }
            _ => format!("failed to load city map from {}", path.display()),
        };
        anyhow::Error::new(err).context(message)
    })
}

/// Run one query, reporting lookup failures on stderr without stopping.
fn handle_query<W: Write>(
    out: &mut W,
    map: &CityMap,
    query: &Query,
    format: OutputFormat,
) -> Result<()> {
    debug!(query = query.label(), "running query");
    match query.run(map) {
        Ok(Response::Outcome(outcome)) => format
            .render(out, &outcome)
            .with_context(|| format!("failed to write {} result", outcome.label()))?,
        Ok(Response::Graph(dump)) => out
            .write_all(dump.as_bytes())
            .context("failed to write graph dump")?,
        Ok(Response::Usage(message)) => {
            out.flush().context("failed to flush query output")?;
            eprintln!("{message}");
        }
        Err(err) => {
            // Keep already-rendered results ahead of the diagnostic.
            out.flush().context("failed to flush query output")?;
            eprintln!("{}", failure_message(query, &err));
        }
    }
    Ok(())
}
