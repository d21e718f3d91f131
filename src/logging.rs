//! Tracing subscriber setup for the CLI

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LOG_FILTER_ENV, log_path};

/// Default filter when `HARMONY_LOG` is unset
const DEFAULT_FILTER: &str = "info";

fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber: text to stderr, JSON lines to the log file.
///
/// Returns the guard that flushes the file writer; keep it alive until exit.
/// When the log directory cannot be created only stderr logging is set up.
pub fn init(verbose: bool) -> Option<WorkerGuard> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let path = log_path();
    let file_writer = path.parent().and_then(|dir| {
        fs::create_dir_all(dir).ok()?;
        let name = path.file_name()?.to_str()?;
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(name)
            .build(dir)
            .ok()?;
        Some(tracing_appender::non_blocking(appender))
    });

    match file_writer {
        Some((writer, guard)) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer);
            tracing_subscriber::registry()
                .with(env_filter(verbose))
                .with(stderr_layer)
                .with(file_layer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter(verbose))
                .with(stderr_layer)
                .init();
            tracing::warn!("Could not open log file {:?}, logging to stderr only", path);
            None
        }
    }
}
