//! Logging system configuration and initialization
//!
//! Console logging through `tracing-subscriber` with an `RUST_LOG` env
//! filter, optionally tee-ed into a daily-rotated file. The non-blocking
//! file writer's guard is parked in a process-wide cell so the writer stays
//! alive for the lifetime of the process.

use std::path::Path;
use std::sync::OnceLock;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "cohort-prefs.log";

/// Initialize console logging with the default `info` level.
pub fn init_logging() -> Result<()> {
    init_logging_with_file(None)
}

/// Initialize logging, optionally writing to a rotated file in `log_dir`.
///
/// The filter honors `RUST_LOG`; without it everything runs at `info`.
pub fn init_logging_with_file(log_dir: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer().with_target(true);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer().with_ansi(false).with_writer(writer);

            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .with(file_layer)
                .try_init()?;

            // A dropped guard would stop the background writer.
            let _ = FILE_GUARD.set(guard);
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .try_init()?;
        }
    }

    Ok(())
}
