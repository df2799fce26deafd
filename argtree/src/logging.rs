//! File logger setup.
//!
//! The library only emits through the `log` facade. Hosts that do not bring
//! their own logger can call [`init`] to get a `simplelog` file logger.

use std::fs::{self, File};
use std::path::PathBuf;

use simplelog::{Config, WriteLogger};

use crate::config::LogConfig;
use crate::error::LoggingError;
use crate::paths;

/// Install a file logger according to `config`.
///
/// Writes to `config.file`, or to the platform cache directory when no file
/// is configured. Returns the path written to.
pub fn init(config: &LogConfig) -> Result<PathBuf, LoggingError> {
    let path = match &config.file {
        Some(path) => path.clone(),
        None => paths::log_file().ok_or(LoggingError::NoLogPath)?,
    };
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).map_err(|source| LoggingError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(&path).map_err(|source| LoggingError::Io {
        path: path.clone(),
        source,
    })?;
    WriteLogger::init(config.level, Config::default(), file)?;
    log::info!("Logging to {} at {}", path.display(), config.level);
    Ok(path)
}
