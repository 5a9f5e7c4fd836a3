//! City map CLI library.
//!
//! This crate provides the pieces shared by the `citymap` and
//! `citymap-validate` binaries: query argument handling, output rendering and
//! logging setup.

pub mod output;
pub mod queries;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout only carries query results. The filter is
/// read from `RUST_LOG` and defaults to `warn`.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
