use serde::Deserialize;
use std::env;

pub const DEFAULT_APOD_BASE_URL: &str = "https://api.nasa.gov/planetary/apod";
pub const DEFAULT_EXPLAIN_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_EXPLAIN_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3000";

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

/// Read a credential, treating blank values as absent.
fn credential(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub apod: ApodConfig,
    pub explain: ExplainConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Upstream image source (NASA APOD).
#[derive(Debug, Clone, Deserialize)]
pub struct ApodConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Unset means requests wait for the upstream indefinitely.
    pub timeout_secs: Option<u64>,
}

/// Upstream explanation source, reached through an OpenAI-compatible
/// chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplainConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

/// Where the CLI client finds a running gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub gateway_url: String,
}

impl ApodConfig {
    pub fn is_configured(&self) -> bool {
        has_credential(self.api_key.as_deref())
    }
}

impl ExplainConfig {
    pub fn is_configured(&self) -> bool {
        has_credential(self.api_key.as_deref())
    }
}

fn has_credential(key: Option<&str>) -> bool {
    key.is_some_and(|key| !key.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("STARGAZE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("STARGAZE_PORT", 3000),
            },
            apod: ApodConfig {
                api_key: credential("NASA_API_KEY"),
                base_url: env::var("NASA_API_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_APOD_BASE_URL.to_string()),
                timeout_secs: parse_env_opt("NASA_TIMEOUT"),
            },
            explain: ExplainConfig {
                api_key: credential("GEMINI_API_KEY"),
                model: env::var("EXPLAIN_MODEL")
                    .unwrap_or_else(|_| DEFAULT_EXPLAIN_MODEL.to_string()),
                base_url: env::var("EXPLAIN_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_EXPLAIN_BASE_URL.to_string()),
                timeout_secs: parse_env_opt("EXPLAIN_TIMEOUT"),
            },
            client: ClientConfig {
                gateway_url: env::var("STARGAZE_GATEWAY_URL")
                    .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string()),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
