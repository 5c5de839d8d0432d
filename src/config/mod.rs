//! Terminal host settings: built-in defaults, then the JSON config file, then
//! command-line flags.

mod cli;
mod error;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::Deserialize;

pub use cli::Cli;
pub use error::ConfigError;

const APP_DIR: &str = "obfuscate-preview";
const CONFIG_FILE: &str = "config.json";

/// Settings for the terminal host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub page_path: String,
    pub csrf_token: String,
    pub session_cookie: Option<String>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".to_string(),
            page_path: "/admin/discord_obfuscate/discordroleobfuscation/add/".to_string(),
            csrf_token: String::new(),
            session_cookie: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// `<config_dir>/obfuscate-preview/config.json`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Reads the config file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overrides settings with any flags given on the command line.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.server_url {
            self.server_url.clone_from(url);
        }
        if let Some(path) = &cli.page_path {
            self.page_path.clone_from(path);
        }
        if let Some(token) = &cli.csrf_token {
            self.csrf_token.clone_from(token);
        }
        if let Some(cookie) = &cli.session_cookie {
            self.session_cookie = Some(cookie.clone());
        }
        if let Some(filter) = &cli.log_filter {
            self.log_filter.clone_from(filter);
        }
        self
    }

    /// Parses `server_url` as the origin preview paths are resolved against.
    pub fn origin(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidServerUrl {
            url: self.server_url.clone(),
            reason,
        };
        let url = Url::parse(&self.server_url).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".to_string()));
        }
        Ok(url)
    }
}

impl Cli {
    /// Loads the config file named by `--config` (or the default one) and
    /// applies the flags on top.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => Config::default_path()?,
        };
        Ok(Config::load(&path)?.apply_cli(self))
    }
}
