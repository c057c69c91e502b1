use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::domain::DomainError;

const LOG_FILE_PREFIX: &str = "breedlens.log";

/// Filter directive for the crate's own targets at `level`.
/// `breedlens` prefixes both the library and the binary targets.
fn crate_directive(level: &str) -> String {
    format!("breedlens={}", level)
}

/// Set up tracing for the client.
///
/// Console output goes to stderr (stdout carries rendered results) and
/// honors `RUST_LOG`. With `file_logging`, JSON records are also written to
/// a daily rotated file in `logs_dir`; keep the returned guard alive or
/// buffered records are lost.
pub fn init_logging(
    logs_dir: &Path,
    level: &str,
    file_logging: bool,
) -> Result<Option<WorkerGuard>, DomainError> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},warn", crate_directive(level))));
    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    let (file, guard) = if file_logging {
        fs::create_dir_all(logs_dir)?;
        let appender = RollingFileAppender::new(Rotation::DAILY, logs_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(EnvFilter::new(crate_directive(level)));
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    // A second initialization (tests, embedding hosts) keeps the first subscriber.
    if tracing_subscriber::registry().with(console).with(file).try_init().is_ok() {
        tracing::info!(
            level = level,
            file_logging = file_logging,
            logs_dir = ?logs_dir,
            "Logging initialized"
        );
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_directive_parses() {
        assert_eq!(crate_directive("debug"), "breedlens=debug");
        assert!(EnvFilter::try_new(crate_directive("info")).is_ok());
    }
}
