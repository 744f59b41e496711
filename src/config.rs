//! Host configuration parsed from environment variables.

use client::util::api_base;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT `{0}`: expected an integer between 1 and 65535")]
    InvalidPort(String),
    #[error("leptos configuration: {0}")]
    Leptos(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    /// Prediction service base URL published to the browser.
    pub api_base: String,
}

impl HostConfig {
    /// Build the host config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `EXODASH_API_BASE_URL`: default `http://localhost:5000/api`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT").map(|raw| raw.trim().to_owned()) {
            None => DEFAULT_PORT,
            Some(raw) if raw.is_empty() => DEFAULT_PORT,
            Some(raw) => match raw.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
        };
        let api_base = api_base::normalize(lookup("EXODASH_API_BASE_URL").as_deref());

        Ok(Self { port, api_base })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
