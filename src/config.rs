//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::catalog::DEFAULT_TTL_SECS;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds applied to every cache write
    pub cache_ttl: u64,
    /// Maximum number of entries the in-memory cache can hold
    pub cache_max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 5000)
    /// - `CACHE_TTL` - Cache entry TTL in seconds (default: 3600, 0 means default)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let cache_ttl = env_or("CACHE_TTL", defaults.cache_ttl);

        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cache_ttl: if cache_ttl == 0 {
                defaults.cache_ttl
            } else {
                cache_ttl
            },
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval).max(1),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5000,
            cache_ttl: DEFAULT_TTL_SECS,
            cache_max_entries: 10_000,
            cleanup_interval: 60,
        }
    }
}
