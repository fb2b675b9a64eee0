//! Tracing subscriber setup for the command line tool

use std::path::Path;

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV_VAR: &str = "PEER_COMPAT_LOG";

/// Map `-v` occurrences to a default level
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber
///
/// Logs go to stderr. When `log_file` is given they are also appended to that
/// file through a non-blocking writer; the returned guard must be kept alive
/// until exit so buffered lines are flushed. Fails when a global subscriber
/// is already installed.
pub fn init(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>, TryInitError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_for_verbosity(verbose).into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let file = log_file.and_then(|path| {
        let dir = path.parent()?;
        let name = path.file_name()?;
        std::fs::create_dir_all(dir)
            .inspect_err(|e| eprintln!("Failed to create log directory {}: {}", dir.display(), e))
            .ok()?;
        Some(tracing_appender::rolling::never(dir, name))
    });

    match file {
        Some(appender) => {
            let (file_writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr.and(file_writer))
                .with_ansi(false)
                .finish()
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .without_time()
                .finish()
                .try_init()?;
            Ok(None)
        }
    }
}
