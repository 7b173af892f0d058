//! Server configuration from command-line flags and environment.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "planboard", version, about = "Planboard collections HTTP server")]
pub struct ServerConfig {
    /// Listen address, `ip:port` or bare `ip` (port 3000).
    #[arg(long, env = "PLANBOARD_LISTEN", default_value = "127.0.0.1:3000")]
    pub listen: String,

    /// SQLite database path. Collections are kept in memory when unset.
    #[arg(long, env = "PLANBOARD_DB")]
    pub db: Option<PathBuf>,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "PLANBOARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logs go to stderr when unset.
    #[arg(long, env = "PLANBOARD_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(planboard_core::default_log_level())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, String> {
        parse_listen(&self.listen)
    }
}

/// Parses `ip:port`, or a bare `ip` with the default port.
pub fn parse_listen(input: &str) -> Result<SocketAddr, String> {
    let trimmed = input.trim();
    if let Ok(addr) = trimmed.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = trimmed.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }
    Err(format!(
        "invalid listen address `{trimmed}`; expected ip:port or ip"
    ))
}
