//! # Synchronizer Configuration Module
//!
//! This module handles loading configuration for the slot synchronizer.
//! It retrieves configuration values from environment variables and
//! provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `AVAILABILITY_URL`: Base URL of the booking server (required)
//! - `AVAILABILITY_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `LOG_LEVEL`: Logging level (default: "info")

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Fixed route the booking server exposes for slot lookups.
const AVAILABLE_TIME_ROUTE: &str = "/get_available_time/";

/// Configuration for the slot synchronizer
///
/// This struct encapsulates everything the synchronizer needs to reach
/// the availability endpoint: where the booking server lives, how long a
/// single lookup may take, and how chatty the logs should be.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the booking server (e.g. "http://localhost:8000")
    pub base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout: u64,

    /// Log level for the application
    pub log_level: Level,
}

impl SyncConfig {
    /// Creates a new SyncConfig from environment variables
    ///
    /// This function loads configuration values from environment
    /// variables, providing sensible defaults where possible. The
    /// AVAILABILITY_URL value is required and will cause an error if not
    /// set.
    ///
    /// # Errors
    ///
    /// This function will return an error if the AVAILABILITY_URL
    /// environment variable is not set.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("AVAILABILITY_URL")
            .wrap_err("AVAILABILITY_URL environment variable must be set")?;

        let request_timeout = env::var("AVAILABILITY_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        let log_level = match env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        Ok(Self {
            base_url,
            request_timeout,
            log_level,
        })
    }

    /// Creates a SyncConfig for the given booking server with default
    /// timeout and log level
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: 30,
            log_level: Level::INFO,
        }
    }

    /// Returns the full URL of the availability endpoint
    ///
    /// A trailing slash on the base URL is tolerated.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            AVAILABLE_TIME_ROUTE
        )
    }
}
