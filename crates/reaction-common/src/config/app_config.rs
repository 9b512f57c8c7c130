//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use reaction_core::ButtonLayout;
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub bot: BotConfig,
    pub poller: PollerConfig,
    pub post: PostConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
    /// Debug logging plus JSON dumps of inbound updates and outgoing posts
    pub verbose: bool,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Bot API credentials and endpoint
#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    pub api_url: String,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Update polling configuration
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    pub poll_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl PollerConfig {
    #[must_use]
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    /// HTTP deadline for one request. Long polls get the poll timeout on top.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Reaction post layout and size budget
#[derive(Debug, Clone, Copy)]
pub struct PostConfig {
    pub layout: ButtonLayout,
    pub max_message_length: usize,
}

// Default value functions
fn default_app_name() -> String {
    "emoji-reactions-bot".to_string()
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout_secs() -> u64 {
    2
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_button_row_length() -> i64 {
    5
}

fn default_button_row_min_length() -> i64 {
    2
}

fn default_max_message_length() -> usize {
    4096
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `BOT_TOKEN` is missing or a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let row_length = parse_or(&lookup, "BUTTON_ROW_LENGTH", default_button_row_length)?;
        let row_min_length =
            parse_or(&lookup, "BUTTON_ROW_MIN_LENGTH", default_button_row_min_length)?;
        let layout = ButtonLayout::new(row_length, row_min_length)
            .map_err(|e| ConfigError::InvalidValue("BUTTON_ROW_MIN_LENGTH", e.to_string()))?;

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: match lookup("APP_ENV") {
                    Some(s) => Environment::parse(&s)
                        .ok_or(ConfigError::InvalidValue("APP_ENV", s))?,
                    None => Environment::default(),
                },
                verbose: parse_or(&lookup, "VERBOSE", || false)?,
            },
            bot: BotConfig {
                token: lookup("BOT_TOKEN")
                    .filter(|s| !s.trim().is_empty())
                    .ok_or(ConfigError::MissingVar("BOT_TOKEN"))?,
                api_url: lookup("BOT_API_URL")
                    .map(|s| s.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_api_url),
            },
            poller: PollerConfig {
                poll_timeout_secs: parse_or(
                    &lookup,
                    "POLL_TIMEOUT_SECS",
                    default_poll_timeout_secs,
                )?,
                request_timeout_secs: parse_or(
                    &lookup,
                    "REQUEST_TIMEOUT_SECS",
                    default_request_timeout_secs,
                )?,
            },
            post: PostConfig {
                layout,
                max_message_length: parse_or(
                    &lookup,
                    "MAX_MESSAGE_LENGTH",
                    default_max_message_length,
                )?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
