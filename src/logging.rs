//! File logging.
//!
//! The viewer owns stdout, so logs only go anywhere when a log file is
//! configured. Without one, `tracing` macros are no-ops.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::config::ViewerConfig;

/// Install a file subscriber if `config.log_file` is set.
///
/// Returns `true` when a subscriber was installed.
pub fn init(config: &ViewerConfig) -> Result<bool> {
    match &config.log_file {
        Some(path) => {
            init_file(path, &config.log_level)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn init_file(path: &Path, level: &str) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!("failed to install logger: {}", e))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Logging to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_installs_nothing() {
        let config = ViewerConfig::default();
        assert!(!init(&config).unwrap());
    }

    #[test]
    fn test_unwritable_log_file_is_error() {
        let config = ViewerConfig::default().with_log_file("/nonexistent-dir/pixcat.log");
        assert!(init(&config).is_err());
    }
}
