//! Log setup.
//!
//! The focus screen owns the terminal, so logs go to a daily file under
//! `<root>/logs/` instead of stderr. The filter comes from `CHRONOS_LOG`
//! (`EnvFilter` syntax) and defaults to `info`.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Paths;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CHRONOS_LOG";

/// Install the global subscriber writing to `<root>/logs/chronos.log`.
///
/// Returns the appender guard, which must stay alive until exit so buffered
/// lines are flushed. Returns `None` if the log directory cannot be created;
/// the program then runs without logs.
#[must_use]
pub fn init(paths: &Paths) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(&paths.logs) {
        eprintln!(
            "warning: logging disabled, cannot create {}: {e}",
            paths.logs.display()
        );
        return None;
    }

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::daily(&paths.logs, "chronos.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init();

    if installed.is_err() {
        return None;
    }

    tracing::info!(
        "Starting chronos v{} (pid: {})",
        env!("CARGO_PKG_VERSION"),
        std::process::id()
    );
    Some(guard)
}
