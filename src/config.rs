//! Configuration Module
//!
//! Handles loading and managing site configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Site configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Seconds a cached collection snapshot stays valid
    pub cache_expiration: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Optional JSON file used to seed the in-process document store
    pub seed_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_EXPIRATION` - Cache validity window in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 5000)
    /// - `SEED_PATH` - Seed file for the document store (default: none)
    pub fn from_env() -> Self {
        Self {
            cache_expiration: env::var("CACHE_EXPIRATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            seed_path: env::var("SEED_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_expiration: 300,
            server_port: 5000,
            seed_path: None,
        }
    }
}
