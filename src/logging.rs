use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `GALLOWS_LOG=debug`.
pub const LOG_ENV: &str = "GALLOWS_LOG";

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Sends logs to `path`; the terminal belongs to the game.
///
/// Failing to open the file or a subscriber that is already set both leave
/// logging off rather than stopping the game.
pub fn init(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("info"))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gallows starting");
}

/// Logs to stderr when there is nowhere to put a log file. Only warnings by
/// default so the game text stays readable.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("warn"))
        .with_writer(std::io::stderr)
        .try_init();
}
