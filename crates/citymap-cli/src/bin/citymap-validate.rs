use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use citymap_cli::init_tracing;
use citymap_lib::validate;

/// Reads a city map from standard input and prints `VALID` or the number of
/// the first malformed line.
#[derive(Parser, Debug)]
#[command(author, version, about = "Validate a city map read from standard input")]
struct Cli {}

fn main() -> Result<()> {
    init_tracing();
    let Cli {} = Cli::parse();

    let stdin = io::stdin();
    match validate(stdin.lock()) {
        Ok(()) => println!("VALID"),
        Err(err) => match err.format_line() {
            Some(line) => println!("{line}"),
            None => return Err(err).context("failed to read standard input"),
        },
    }
    Ok(())
}
