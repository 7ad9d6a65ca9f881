use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Base name of the daily log file; the appender adds a date suffix.
const LOG_FILE_PREFIX: &str = "treecmp.log";

/// Install the global subscriber.
///
/// Console output goes to stderr so stdout stays free for reports. With a
/// `log_dir`, events are also appended without colors to a file that rolls
/// over daily. `RUST_LOG` overrides the verbosity flag.
pub fn init(verbose: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(rolling::daily(dir, LOG_FILE_PREFIX)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("failed to initialize logging")
}
