//! Log sink for the terminal host.
//!
//! The UI owns the terminal, so logs only go somewhere when `--log-file` is
//! given. Verbosity comes from `FTICK_LOG` (an `EnvFilter` directive,
//! default `info`).

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{HostError, Result};

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "FTICK_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Build the filter from `FTICK_LOG`, falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber writing to `path`. No-op without a path.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| HostError::Logging {
            message: err.to_string(),
        })?;
    tracing::info!(path = %path.display(), "logging initialised");
    Ok(())
}
