//! Server configuration loaded from the environment.
//!
//! Every setting has a default so `merx-api` starts with no configuration
//! at all. A `.env` file in the working directory is honored in development
//! (loaded by `main` via dotenvy before this module reads anything).

use std::env;

use thiserror::Error;

/// Default port the server binds when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Default SQLite database file when `DATABASE_PATH` is unset.
pub const DEFAULT_DATABASE_PATH: &str = "./merx.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// TCP port to bind on all interfaces.
    pub port: u16,
    /// Path to the SQLite database file.
    pub database_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE_PATH.to_string(),
        }
    }
}

impl ApiConfig {
    /// Read configuration from environment variables.
    ///
    /// | Variable        | Default     |
    /// |-----------------|-------------|
    /// | `PORT`          | `3000`      |
    /// | `DATABASE_PATH` | `./merx.db` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(port) = env::var("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                var: "PORT".to_string(),
                value: port.clone(),
            })?;
        }

        if let Ok(path) = env::var("DATABASE_PATH") {
            if !path.trim().is_empty() {
                config.database_path = path;
            }
        }

        Ok(config)
    }

    /// Socket address string for the listener, e.g. `0.0.0.0:3000`.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
