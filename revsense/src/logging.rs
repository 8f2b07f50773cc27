//! File logging.
//!
//! The terminal belongs to the TUI, so tracing output goes to an append-only
//! file. The filter comes from `REVSENSE_LOG` and defaults to `info`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "REVSENSE_LOG";

/// Installs the global subscriber writing to `path`, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns `Err` if the directory or the file cannot be created.
pub fn init_logging(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let log_file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();
    Ok(())
}
