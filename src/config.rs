//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! ```bash
//! export LISTEN="0.0.0.0:3000"
//! export RUST_LOG="info"                  # `trace` enables full request dumps
//! export LOG_FORMAT="text"                # or `json`
//! export FORWARD_HEADER="X-Forwarded-For"
//! export SESSION_COOKIE="session"
//! export SESSIONS_FILE="sessions.json"    # optional seed for the session store
//! export INVENTORY_FILE="inventory.json"
//! export INVENTORY_TTL_SECONDS="300"
//! export TRACE_BODY_LIMIT="65536"
//! ```
//!
//! Every variable is optional; defaults are shown above.

use anyhow::{Context, Result};
use axum::http::HeaderName;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::sessions::DEFAULT_SESSION_COOKIE;
use crate::state::{DEFAULT_FORWARD_HEADER, DEFAULT_TRACE_BODY_LIMIT};

/// Largest accepted `TRACE_BODY_LIMIT` (16 MiB).
const MAX_TRACE_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Header holding the client address when running behind a reverse proxy.
    pub forward_header: String,
    /// Cookie carrying the session token.
    pub session_cookie: String,
    /// JSON file seeding users and sessions at startup.
    pub sessions_file: Option<String>,
    /// JSON file the inventory is loaded from.
    pub inventory_file: String,
    /// Age after which the inventory is reloaded on the next gated request.
    pub inventory_ttl_seconds: u64,
    /// Largest request body buffered into a trace dump.
    pub trace_body_limit: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but does not parse.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let forward_header =
            env::var("FORWARD_HEADER").unwrap_or_else(|_| DEFAULT_FORWARD_HEADER.to_string());
        let session_cookie =
            env::var("SESSION_COOKIE").unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.to_string());
        let sessions_file = env::var("SESSIONS_FILE").ok().filter(|v| !v.is_empty());
        let inventory_file =
            env::var("INVENTORY_FILE").unwrap_or_else(|_| "inventory.json".to_string());

        let inventory_ttl_seconds = parse_var("INVENTORY_TTL_SECONDS", 300)?;
        let trace_body_limit = parse_var("TRACE_BODY_LIMIT", DEFAULT_TRACE_BODY_LIMIT)?;

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            forward_header,
            session_cookie,
            sessions_file,
            inventory_file,
            inventory_ttl_seconds,
            trace_body_limit,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `forward_header` is not a valid header name
    /// - `session_cookie` is empty or contains separators
    /// - `inventory_ttl_seconds` is zero
    /// - `trace_body_limit` is zero or above 16 MiB
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        self.forward_header_name()?;

        if self.session_cookie.is_empty()
            || self
                .session_cookie
                .contains(|c: char| c == ';' || c == '=' || c.is_whitespace())
        {
            anyhow::bail!(
                "SESSION_COOKIE must be a non-empty cookie name, got '{}'",
                self.session_cookie
            );
        }

        if self.inventory_ttl_seconds == 0 {
            anyhow::bail!("INVENTORY_TTL_SECONDS must be greater than 0");
        }

        if self.trace_body_limit == 0 || self.trace_body_limit > MAX_TRACE_BODY_LIMIT {
            anyhow::bail!(
                "TRACE_BODY_LIMIT must be between 1 and {}, got {}",
                MAX_TRACE_BODY_LIMIT,
                self.trace_body_limit
            );
        }

        Ok(())
    }

    /// Parses `forward_header` into a lowercase header name.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid HTTP header name.
    pub fn forward_header_name(&self) -> Result<HeaderName> {
        HeaderName::from_str(&self.forward_header).with_context(|| {
            format!(
                "FORWARD_HEADER must be a valid header name, got '{}'",
                self.forward_header
            )
        })
    }

    pub fn inventory_ttl(&self) -> Duration {
        Duration::from_secs(self.inventory_ttl_seconds)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Forward header: {}", self.forward_header);
        tracing::info!("  Session cookie: {}", self.session_cookie);
        match &self.sessions_file {
            Some(path) => tracing::info!("  Sessions file: {}", path),
            None => tracing::info!("  Sessions file: none (empty store)"),
        }
        tracing::info!("  Inventory file: {}", self.inventory_file);
        tracing::info!("  Inventory TTL: {}s", self.inventory_ttl_seconds);
        tracing::info!("  Trace body limit: {} bytes", self.trace_body_limit);
    }
}

/// Reads `name` as a number, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable does not parse or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
