//! Subscriber setup: env filter, optional rolling log file, stderr console

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

use crate::config::{AppConfig, LogRotation};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

const FALLBACK_LEVEL: &str = "info";

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

/// `log_level` as a filter; a malformed directive falls back to `info`
/// instead of silencing everything.
pub fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level).unwrap_or_else(|err| {
        eprintln!("invalid log_level '{}': {}, using {}", log_level, err, FALLBACK_LEVEL);
        EnvFilter::new(FALLBACK_LEVEL)
    })
}

/// `None` when `log_dir` is blank
fn file_appender(config: &AppConfig) -> Option<RollingFileAppender> {
    if config.log_dir.trim().is_empty() {
        return None;
    }
    Some(RollingFileAppender::new(
        config.rotation.into(),
        &config.log_dir,
        &config.log_file,
    ))
}

/// Install the global subscriber. `RUST_LOG` overrides `log_level`.
///
/// Keep the returned guard alive for the lifetime of the process or
/// buffered file output is lost. No guard means no log file.
pub fn init_logging(config: &AppConfig) -> Option<WorkerGuard> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let guard = file_appender(config).map(|appender| {
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = if config.use_json {
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(writer)
                .with_ansi(false)
                .boxed()
        } else {
            fmt::layer()
                .with_target(false)
                .with_writer(writer)
                .with_ansi(false)
                .boxed()
        };
        layers.push(layer);
        guard
    });

    // JSON goes to the file only; stdout carries handoff links, so the
    // console layer writes to stderr
    if !config.use_json || guard.is_none() {
        layers.push(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .boxed(),
        );
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| build_filter(&config.log_level));

    tracing_subscriber::registry().with(layers).with(filter).init();

    guard
}
