//! Server configuration.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GOSH_DB_PATH` | gosh.db | SQLite database file |
//! | `GOSH_HOST` | 0.0.0.0 | Host to bind |
//! | `GOSH_PORT` | 3000 | Listen port |
//! | `GOSH_LOG_LEVEL` | info | Fallback log filter when `RUST_LOG` is unset |
//! | `GOSH_CACHE_TTL` | 60 | Response cache TTL in seconds (0 disables) |
//!
//! Every variable can also be passed as a flag (`--db-path`, `--port`, ...).

use std::time::Duration;

use clap::Parser;

/// Configuration for the catalog server.
#[derive(Debug, Clone, Parser)]
#[command(name = "gosh-server")]
#[command(about = "Program catalog with HTTP and WebSocket search")]
pub struct ServerConfig {
    /// SQLite database file path.
    #[arg(long, env = "GOSH_DB_PATH", default_value = "gosh.db")]
    pub db_path: String,

    /// Host address to bind to.
    #[arg(long, env = "GOSH_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "GOSH_PORT", default_value = "3000")]
    pub port: u16,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "GOSH_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Seconds a cached GET response stays valid; 0 turns caching off.
    #[arg(long, env = "GOSH_CACHE_TTL", default_value = "60")]
    pub cache_ttl: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: "gosh.db".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            cache_ttl: 60,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Cache TTL as a [`Duration`].
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.db_path.trim().is_empty() {
            errors.push("Database path cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
