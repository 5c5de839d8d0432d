use crate::config::ConfigError;
use crate::logging::LogSetupError;

/// Errors that can stop the terminal host.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, runtime startup).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File logging could not be set up.
    #[error("logging error: {0}")]
    Logging(#[from] LogSetupError),
}
