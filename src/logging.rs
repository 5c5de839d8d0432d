//! File logging for the terminal host. The terminal belongs to the UI, so
//! events go to a log file under the platform data directory.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable whose filter directives take precedence over config.
pub const LOG_ENV: &str = "OBFUSCATE_PREVIEW_LOG";

const APP_DIR: &str = "obfuscate-preview";
const LOG_FILE: &str = "obfuscate-preview.log";

#[derive(Debug, thiserror::Error)]
pub enum LogSetupError {
    /// The platform does not provide a data directory.
    #[error("could not determine data directory")]
    NoDataDir,

    #[error("could not open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("could not install log subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Installs the global subscriber and returns the log file path.
///
/// `configured` is used unless [`LOG_ENV`] is set to a non-empty value.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn init(configured: &str) -> Result<PathBuf, LogSetupError> {
    let data_dir = dirs::data_dir().ok_or(LogSetupError::NoDataDir)?;
    let path = log_path(&data_dir);
    let file = open_log_file(&path)?;
    let filter = choose_filter(std::env::var(LOG_ENV).ok(), configured)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;
    Ok(path)
}

/// `<data_dir>/obfuscate-preview/obfuscate-preview.log`
pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(APP_DIR).join(LOG_FILE)
}

fn open_log_file(path: &Path) -> Result<File, LogSetupError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Picks the environment's filter if present, else the configured one.
fn choose_filter(env: Option<String>, configured: &str) -> Result<EnvFilter, LogSetupError> {
    let directives = env
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| configured.to_string());
    Ok(EnvFilter::try_new(directives)?)
}
