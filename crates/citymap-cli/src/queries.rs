//! Query flags and their command-line ordering.
//!
//! Queries run in the order their flags appear on the command line, so the
//! parsed values are paired with the argument indices recorded by clap.

use std::ffi::OsString;

use clap::{ArgAction, ArgMatches, Args};
use tracing::debug;

use citymap_lib::{render_graph, CityMap, QueryOutcome, Result as LibResult};

/// Long flag names paired with the number of values each consumes.
const VALUED_FLAGS: &[(&str, usize)] = &[
    ("file", 1),
    ("format", 1),
    ("location", 1),
    ("diameter", 0),
    ("distance", 2),
    ("roaddist", 2),
    ("print-graph", 0),
];

/// Query flags that are reported and skipped, rather than rejected, when
/// the command line ends before their values.
const QUERY_FLAGS_WITH_VALUES: &[&str] = &["location", "distance", "roaddist"];

/// Hidden flag standing in for a query flag that ran out of values.
const INCOMPLETE_FLAG: &str = "--incomplete";

/// Query flags accepted by the `citymap` binary.
#[derive(Args, Debug, Default)]
pub struct QueryArgs {
    /// Print the coordinates of a named location.
    #[arg(long, value_name = "NAME", action = ArgAction::Append, allow_hyphen_values = true)]
    pub location: Vec<String>,

    /// Print the two POIs furthest apart and their distance.
    #[arg(
        long,
        action = ArgAction::Append,
        num_args = 0,
        default_missing_value = "true"
    )]
    pub diameter: Vec<bool>,

    /// Print the straight-line distance between two named locations.
    #[arg(
        long,
        num_args = 2,
        value_names = ["FROM", "TO"],
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub distance: Vec<String>,

    /// Print the shortest road distance between two named locations.
    #[arg(
        long,
        num_args = 2,
        value_names = ["FROM", "TO"],
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub roaddist: Vec<String>,

    /// Dump every node and its outgoing roads.
    #[arg(
        long,
        action = ArgAction::Append,
        num_args = 0,
        default_missing_value = "true"
    )]
    pub print_graph: Vec<bool>,

    #[arg(long, hide = true, value_name = "FLAG", action = ArgAction::Append)]
    pub incomplete: Vec<String>,

    /// Stray arguments; they are ignored.
    #[arg(hide = true, value_name = "IGNORED")]
    pub ignored: Vec<String>,
}

/// A single query against a loaded map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Location(String),
    Diameter,
    Distance { from: String, to: String },
    RoadDistance { from: String, to: String },
    PrintGraph,
    /// A query flag given without all of its values.
    Incomplete(String),
}

/// What a query produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Outcome(QueryOutcome),
    Graph(String),
    /// Usage problem reported in place of the query.
    Usage(String),
}

impl Query {
    pub fn label(&self) -> &'static str {
        match self {
            Query::Location(_) => "location",
            Query::Diameter => "diameter",
            Query::Distance { .. } => "distance",
            Query::RoadDistance { .. } => "road_distance",
            Query::PrintGraph => "print_graph",
            Query::Incomplete(_) => "incomplete",
        }
    }

    pub fn run(&self, map: &CityMap) -> LibResult<Response> {
        let outcome = match self {
            Query::Location(name) => QueryOutcome::Location {
                name: name.clone(),
                coordinate: map.find_location(name)?,
            },
            Query::Diameter => QueryOutcome::Diameter {
                diameter: map.find_diameter(),
            },
            Query::Distance { from, to } => QueryOutcome::Distance {
                from: from.clone(),
                to: to.clone(),
                meters: map.distance_between(from, to)?,
            },
            Query::RoadDistance { from, to } => {
                let route = map.road_distance(from, to)?;
                QueryOutcome::RoadDistance {
                    from: from.clone(),
                    to: to.clone(),
                    meters: route.distance,
                    route,
                }
            }
            Query::PrintGraph => return Ok(Response::Graph(render_graph(map.graph()))),
            Query::Incomplete(flag) => return Ok(Response::Usage(missing_values_message(flag))),
        };
        Ok(Response::Outcome(outcome))
    }
}

fn missing_values_message(flag: &str) -> String {
    match flag {
        "location" => "Error: -location requires a location name".to_string(),
        other => format!("Error: -{other} requires two location names"),
    }
}

impl QueryArgs {
    /// Queries sorted by the position of their flag on the command line.
    ///
    /// `matches` must come from the same parse that produced `self`.
    pub fn ordered(&self, matches: &ArgMatches) -> Vec<Query> {
        let mut indexed: Vec<(usize, Query)> = Vec::new();

        indexed.extend(
            indices(matches, "location")
                .into_iter()
                .zip(&self.location)
                .map(|(index, name)| (index, Query::Location(name.clone()))),
        );

        for (index, from, to) in pairs(&self.distance, indices(matches, "distance")) {
            indexed.push((index, Query::Distance { from, to }));
        }
        for (index, from, to) in pairs(&self.roaddist, indices(matches, "roaddist")) {
            indexed.push((index, Query::RoadDistance { from, to }));
        }

        indexed.extend(
            indices(matches, "diameter")
                .into_iter()
                .map(|index| (index, Query::Diameter)),
        );
        indexed.extend(
            indices(matches, "print_graph")
                .into_iter()
                .map(|index| (index, Query::PrintGraph)),
        );
        indexed.extend(
            indices(matches, "incomplete")
                .into_iter()
                .zip(&self.incomplete)
                .map(|(index, flag)| (index, Query::Incomplete(flag.clone()))),
        );

        for stray in &self.ignored {
            debug!(argument = %stray, "ignoring unrecognised argument");
        }

        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, query)| query).collect()
    }
}

fn indices(matches: &ArgMatches, id: &str) -> Vec<usize> {
    matches
        .indices_of(id)
        .map(|indices| indices.collect())
        .unwrap_or_default()
}

/// Group two-valued flags into `(index, first, second)` using the index of
/// the first value.
fn pairs(values: &[String], indices: Vec<usize>) -> Vec<(usize, String, String)> {
    values
        .chunks_exact(2)
        .zip(indices.chunks_exact(2))
        .map(|(values, indices)| (indices[0], values[0].clone(), values[1].clone()))
        .collect()
}

/// Rewrite single-dash long flags (`-location`, `-roaddist`, ...) to their
/// double-dash spelling.
///
/// Values consumed by a flag are passed through untouched, so a location
/// literally named `-diameter` stays a value. A query flag that runs out of
/// values at the end of the command line is replaced by a hidden
/// `--incomplete <flag>` marker so it can be reported in order.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let mut normalized: Vec<OsString> = Vec::with_capacity(args.len());
    let mut position = 0;

    while position < args.len() {
        let arg = &args[position];
        position += 1;
        if position == 1 {
            normalized.push(arg.clone());
            continue;
        }

        let Some((name, arity, spelling)) = arg.to_str().and_then(known_flag) else {
            normalized.push(arg.clone());
            continue;
        };

        let remaining = args.len() - position;
        if remaining < arity && QUERY_FLAGS_WITH_VALUES.contains(&name) {
            normalized.push(OsString::from(INCOMPLETE_FLAG));
            normalized.push(OsString::from(name));
            continue;
        }

        normalized.push(spelling);
        let values = arity.min(remaining);
        normalized.extend(args[position..position + values].iter().cloned());
        position += values;
    }

    normalized
}

/// Recognise `-f`, `-<flag>` and `--<flag>`, returning the long name, its
/// arity and the spelling clap understands.
fn known_flag(text: &str) -> Option<(&'static str, usize, OsString)> {
    if text == "-f" {
        return Some(("file", 1, OsString::from(text)));
    }
    let name = text.strip_prefix("--").or_else(|| text.strip_prefix('-'))?;
    VALUED_FLAGS
        .iter()
        .find(|(flag, _)| *flag == name)
        .map(|(flag, arity)| (*flag, *arity, OsString::from(format!("--{flag}"))))
}
