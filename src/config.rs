// src/config.rs
//! Settings read from the environment (and `.env` when present).

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::companion::ComposerSettings;
use crate::gemini_client;

const DEFAULT_ALLOWED_HOSTS: &str =
    "http://localhost:3000,http://localhost:8000,http://127.0.0.1:3000,http://127.0.0.1:8000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub api_prefix: String,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub allowed_origins: Vec<String>,
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub generation_timeout: Duration,
    pub max_message_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // GOOGLE_API_KEY wins; GEMINI_API_KEY is accepted too
        let google_api_key = lookup("GOOGLE_API_KEY")
            .or_else(|| lookup("GEMINI_API_KEY"))
            .filter(|k| !k.trim().is_empty());

        Ok(Config {
            app_name: get("APP_NAME", "WellPal Backend"),
            api_prefix: api_prefix(get("API_V1_STR", "/api/v1"))?,
            host: get("HOST", "0.0.0.0"),
            port: parse(&lookup, "PORT", 8000)?,
            debug: parse_bool(&lookup, "DEBUG", true)?,
            allowed_origins: get("ALLOWED_HOSTS", DEFAULT_ALLOWED_HOSTS)
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            google_api_key,
            gemini_model: get("GEMINI_MODEL", gemini_client::DEFAULT_MODEL),
            gemini_base_url: get("GEMINI_BASE_URL", gemini_client::DEFAULT_BASE_URL),
            generation_timeout: Duration::from_secs(parse(&lookup, "GENERATION_TIMEOUT_SECS", 20)?),
            max_message_chars: parse(&lookup, "MAX_MESSAGE_CHARS", 2000)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn composer_settings(&self) -> ComposerSettings {
        ComposerSettings {
            generation_timeout: self.generation_timeout,
            max_message_chars: self.max_message_chars,
        }
    }
}

fn parse<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

/// Route prefix with exactly one leading slash and no trailing one; `/` and
/// blank collapse to the empty prefix (routes mounted at the top level).
fn api_prefix(value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_matches('/');
    if trimmed.contains(|c: char| c.is_whitespace() || c == '*' || c == ':' || c == '{' || c == '}') {
        return Err(ConfigError::Invalid {
            key: "API_V1_STR",
            value,
        });
    }

    if trimmed.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("/{}", trimmed))
    }
}

fn parse_bool<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value }),
        },
        None => Ok(default),
    }
}
