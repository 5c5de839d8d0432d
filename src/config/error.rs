/// Errors that can occur while loading the terminal host's configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for [`Config`](super::Config).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform does not provide a config directory.
    #[error("could not determine config directory")]
    NoConfigDir,

    /// `server_url` is not an absolute URL that paths can be joined onto.
    #[error("invalid server URL {url}: {reason}")]
    InvalidServerUrl { url: String, reason: String },
}
