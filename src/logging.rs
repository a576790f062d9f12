//! Log setup for the command-line entry point
//!
//! Logs go to a JSON file under the data directory so that stdout stays
//! reserved for command output.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter (e.g. `debug`, `release_notifier=trace`)
pub const LOG_ENV: &str = "RELEASE_NOTIFIER_LOG";

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber writing to `log_path`.
///
/// The returned guard flushes pending records when dropped and must be kept
/// alive for the life of the program.
pub fn init(log_path: &Path) -> anyhow::Result<WorkerGuard> {
    let directory = log_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "release-notifier.log".to_string());

    std::fs::create_dir_all(directory)?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(writer))
        .try_init()?;

    Ok(guard)
}
