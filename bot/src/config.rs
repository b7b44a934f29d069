// pricehound_bot/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use pricehound::search::{DEFAULT_SEARCH_TEMPLATE, DEFAULT_USER_AGENT};
use pricehound::SearchSettings;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Clone)]
pub struct AppConfig {
  pub bot_token: String,
  pub telegram_api_url: String,
  /// Server-side wait hint for `getUpdates` long polling.
  pub poll_timeout: Duration,
  pub search: SearchSettings,
  /// `None` means one task per message without any bound.
  pub max_concurrent_lookups: Option<usize>,
}

// Hand-written so the bot token never ends up in logs.
impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppConfig")
      .field("bot_token", &"[REDACTED]")
      .field("telegram_api_url", &self.telegram_api_url)
      .field("poll_timeout", &self.poll_timeout)
      .field("search", &self.search)
      .field("max_concurrent_lookups", &self.max_concurrent_lookups)
      .finish()
  }
}

fn get_env(var_name: &str) -> Result<String> {
  env::var(var_name)
    .map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    .and_then(|value| {
      if value.trim().is_empty() {
        Err(AppError::Config(format!("Environment variable '{}' is empty", var_name)))
      } else {
        Ok(value)
      }
    })
}

fn parse_env<T>(var_name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match get_env(var_name) {
    Ok(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {}: {}", var_name, e))),
    Err(_) => Ok(default),
  }
}

impl AppConfig {
  /// Loads `.env` (if present) and then reads the process environment.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_process_env()
  }

  pub(crate) fn from_process_env() -> Result<Self> {
    let bot_token = get_env("BOT_TOKEN")?;
    let telegram_api_url = get_env("TELEGRAM_API_URL")
      .unwrap_or_else(|_| DEFAULT_TELEGRAM_API_URL.to_string())
      .trim_end_matches('/')
      .to_string();
    let poll_timeout = Duration::from_secs(parse_env("POLL_TIMEOUT_SECS", 60u64)?);

    let search = SearchSettings {
      url_template: get_env("SEARCH_API_TEMPLATE").unwrap_or_else(|_| DEFAULT_SEARCH_TEMPLATE.to_string()),
      user_agent: get_env("SEARCH_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
      timeout: Duration::from_secs(parse_env("SEARCH_TIMEOUT_SECS", 15u64)?),
    };
    search
      .validate()
      .map_err(|e| AppError::Config(e.to_string()))?;

    let max_concurrent_lookups = match parse_env("MAX_CONCURRENT_LOOKUPS", 0usize)? {
      0 => None,
      n => Some(n),
    };

    tracing::info!("Application configuration loaded successfully.");
    Ok(Self {
      bot_token,
      telegram_api_url,
      poll_timeout,
      search,
      max_concurrent_lookups,
    })
  }
}
