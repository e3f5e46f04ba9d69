//! Agent configuration.
//!
//! Read from the process environment, after loading a `.env` file if one is
//! present. Every value has a default so an empty environment yields a
//! working local setup.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

use crate::error::AppError;

pub const ENV_BACKEND_URL: &str = "LIA_BACKEND_URL";
pub const ENV_AUTH_TOKEN: &str = "LIA_AUTH_TOKEN";
pub const ENV_USER_NAME: &str = "LIA_USER_NAME";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "LIA_REQUEST_TIMEOUT_SECS";
pub const ENV_HISTORY_LIMIT: &str = "LIA_HISTORY_LIMIT";
pub const ENV_LOG_FORMAT: &str = "LIA_LOG_FORMAT";

const DEFAULT_BACKEND_URL: &str = "http://localhost:3000/api/ai-chat";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
// Persistent context keeps the last seven messages
const DEFAULT_HISTORY_LIMIT: usize = 7;

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Bunyan-style JSON lines
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

/// Configuration of the chat agent and its backend client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AgentConfig {
    /// Endpoint receiving `{message, mode, conversationHistory}` posts.
    #[validate(url)]
    pub backend_url: String,
    /// Optional bearer token sent to the backend.
    #[serde(skip_serializing)]
    pub auth_token: Option<String>,
    /// Display name forwarded to the backend for personalised replies.
    pub user_name: Option<String>,
    /// Upper bound for one backend round trip, in seconds (1 - 300).
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,
    /// Number of past turns kept per session (1 - 50).
    #[validate(range(min = 1, max = 50))]
    pub history_limit: usize,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            auth_token: None,
            user_name: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            log_format: LogFormat::Text,
        }
    }
}

impl AgentConfig {
    /// Loads `.env` (if any) and then reads the environment.
    pub fn load() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Reads the configuration from environment variables only.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let config = Self {
            backend_url: non_empty_var(ENV_BACKEND_URL).unwrap_or(defaults.backend_url),
            auth_token: non_empty_var(ENV_AUTH_TOKEN),
            user_name: non_empty_var(ENV_USER_NAME),
            request_timeout_secs: parse_var(ENV_REQUEST_TIMEOUT_SECS)?
                .unwrap_or(defaults.request_timeout_secs),
            history_limit: parse_var(ENV_HISTORY_LIMIT)?.unwrap_or(defaults.history_limit),
            log_format: match non_empty_var(ENV_LOG_FORMAT) {
                Some(value) => value.parse()?,
                None => defaults.log_format,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Timeout applied to every backend request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(key: &str) -> Result<Option<T>, AppError>
where
    T::Err: std::fmt::Display,
{
    non_empty_var(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| AppError::Config(format!("{} has invalid value '{}': {}", key, raw, e)))
        })
        .transpose()
}
