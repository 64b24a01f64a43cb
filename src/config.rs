// ABOUTME: Environment-based server configuration loading and validation
// ABOUTME: Reads HTTP port and database URL with sensible development defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server configuration loaded from environment variables
//!
//! Configuration is environment-only: there is no config file. The LLM
//! provider reads its own credentials (`GROQ_API_KEY`) when constructed.

use crate::errors::{AppError, AppResult};
use std::env;

/// Environment variable for the HTTP listen port
const HTTP_PORT_ENV: &str = "HTTP_PORT";

/// Environment variable for the database connection URL
const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Default HTTP port when `HTTP_PORT` is unset
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default SQLite database location
const DEFAULT_DATABASE_URL: &str = "sqlite:data/reactfit.db";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP server listens on
    pub http_port: u16,
    /// SQLite connection URL
    pub database_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `HTTP_PORT` is set but not a valid port number.
    pub fn from_env() -> AppResult<Self> {
        let http_port = match env::var(HTTP_PORT_ENV) {
            Ok(value) => value.parse::<u16>().map_err(|e| {
                AppError::config(format!("{HTTP_PORT_ENV} must be a port number: {e}"))
            })?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let database_url =
            env::var(DATABASE_URL_ENV).unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        Ok(Self {
            http_port,
            database_url,
        })
    }

    /// One-line configuration summary for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "config: http_port={} database_url={}",
            self.http_port, self.database_url
        )
    }
}
