// Runtime configuration.
// Command-line flags with environment variable fallbacks.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::remote::DEFAULT_BASE_URL;
use crate::store::paths;

#[derive(Debug, Clone, Parser)]
#[command(name = "postcache", version, about = "Cache-aside service for users and posts")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "POSTCACHE_LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// Directory for cached records (defaults to the platform data dir)
    #[arg(long, env = "POSTCACHE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the remote users/posts API
    #[arg(long, env = "POSTCACHE_REMOTE_URL", default_value = DEFAULT_BASE_URL)]
    pub remote_url: String,

    /// Emit logs as JSON
    #[arg(long, env = "POSTCACHE_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Resolved data directory: explicit flag, then platform dir, then ./data.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(paths::default_data_dir)
            .unwrap_or_else(|| PathBuf::from("data"))
    }
}
