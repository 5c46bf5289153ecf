//! Console Configuration
//!
//! Connection settings for the support-chat console: socket base url,
//! socket path, and an optional bearer token for the profile API.

use thiserror::Error;

/// Default socket base URL
const DEFAULT_SOCKET_URL: &str = "http://localhost:5000";
/// Default socket path
const DEFAULT_SOCKET_PATH: &str = "/socket.io";

/// Console configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    socket_url: String,
    socket_path: String,
    token: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let socket_url = std::env::var("SUPPORT_SOCKET_URL")
            .or_else(|_| std::env::var("BACKEND_URL"))
            .or_else(|_| std::env::var("API_BASE_URL"))
            .unwrap_or_else(|_| DEFAULT_SOCKET_URL.to_string());
        let socket_path =
            std::env::var("SUPPORT_SOCKET_PATH").unwrap_or_else(|_| DEFAULT_SOCKET_PATH.to_string());
        Self {
            socket_url: normalize_url(&socket_url),
            socket_path,
            token: None,
        }
    }
}

impl ConsoleConfig {
    /// Create a configuration from the environment (with defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ConsoleConfigBuilder
    pub fn builder() -> ConsoleConfigBuilder {
        ConsoleConfigBuilder::default()
    }

    /// Socket base URL, trailing slash trimmed
    pub fn socket_url(&self) -> &str {
        &self.socket_url
    }

    /// Socket endpoint path
    pub fn socket_path(&self) -> &str {
        &self.socket_path
    }

    /// Full URL for a backend API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.socket_url, path)
    }

    /// Set the bearer token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the bearer token
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Clear the token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }
}

/// Builder for ConsoleConfig
#[derive(Debug, Default)]
pub struct ConsoleConfigBuilder {
    socket_url: Option<String>,
    socket_path: Option<String>,
}

impl ConsoleConfigBuilder {
    /// Set the socket base URL
    pub fn socket_url(mut self, url: impl Into<String>) -> Self {
        self.socket_url = Some(url.into());
        self
    }

    /// Set the socket endpoint path
    pub fn socket_path(mut self, path: impl Into<String>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ConsoleConfig, ConfigError> {
        let socket_url = self.socket_url.ok_or(ConfigError::MissingValue("socket_url"))?;
        if !socket_url.starts_with("http://") && !socket_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(socket_url));
        }
        Ok(ConsoleConfig {
            socket_url: normalize_url(&socket_url),
            socket_path: self
                .socket_path
                .unwrap_or_else(|| DEFAULT_SOCKET_PATH.to_string()),
            token: None,
        })
    }
}

fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
