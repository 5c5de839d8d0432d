use std::path::PathBuf;

use clap::Parser;

/// Command-line flags; each one overrides the matching config file setting.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "obfuscate-preview", version, about)]
pub struct Cli {
    /// Config file to read instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Origin of the admin site, e.g. http://127.0.0.1:8000
    #[arg(long, value_name = "URL")]
    pub server_url: Option<String>,

    /// Admin page path the preview endpoint is derived from.
    #[arg(long, value_name = "PATH")]
    pub page_path: Option<String>,

    /// Anti-forgery token sent with every preview request.
    #[arg(long, value_name = "TOKEN")]
    pub csrf_token: Option<String>,

    /// Cookie header for an authenticated admin session.
    #[arg(long, value_name = "COOKIE")]
    pub session_cookie: Option<String>,

    /// Pre-fills the group field.
    #[arg(long, value_name = "ID")]
    pub group: Option<String>,

    /// Log filter directives, e.g. `debug` or `obfuscate_preview=trace`.
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}
