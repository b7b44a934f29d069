// pricehound_bot/src/services/telegram.rs

//! Minimal Telegram Bot API client: `getMe`, `getUpdates` long polling and
//! `sendMessage`.

use crate::config::AppConfig;
use crate::dispatcher::InboundMessage;
use crate::errors::{AppError, Result as AppResult};
use crate::services::replies::{OutgoingMessage, ReplySink};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Extra time on top of the long-poll hint before the HTTP call gives up.
const POLL_GRACE: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
  ok: bool,
  result: Option<T>,
  description: Option<String>,
  error_code: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
  pub id: i64,
  #[serde(default)]
  pub first_name: String,
  pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
  pub update_id: i64,
  pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
  pub message_id: i64,
  pub chat: Chat,
  pub text: Option<String>,
  #[serde(default)]
  pub entities: Vec<MessageEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
  pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageEntity {
  #[serde(rename = "type")]
  pub kind: String,
  pub offset: usize,
}

impl Message {
  /// A command is a message whose first entity is a `bot_command` at offset 0.
  pub fn is_command(&self) -> bool {
    self
      .entities
      .first()
      .map_or(false, |entity| entity.offset == 0 && entity.kind == "bot_command")
  }

  /// `None` for messages without text (stickers, photos, ...).
  pub fn inbound(&self) -> Option<InboundMessage> {
    let text = self.text.as_ref().filter(|t| !t.is_empty())?;
    Some(InboundMessage {
      chat_id: self.chat.id,
      text: text.clone(),
      is_command: self.is_command(),
    })
  }
}

#[derive(Debug, Serialize)]
struct GetUpdatesParams<'a> {
  offset: i64,
  timeout: u64,
  allowed_updates: &'a [&'a str],
}

#[derive(Clone)]
pub struct TelegramClient {
  http: reqwest::Client,
  /// `<api>/bot<token>`; never logged.
  endpoint: String,
  poll_timeout: Duration,
}

impl TelegramClient {
  pub fn new(config: &AppConfig) -> AppResult<Self> {
    let http = reqwest::Client::builder()
      .timeout(config.poll_timeout + POLL_GRACE)
      .build()
      .map_err(|e| AppError::Http(e.without_url()))?;
    Ok(Self {
      http,
      endpoint: format!("{}/bot{}", config.telegram_api_url, config.bot_token),
      poll_timeout: config.poll_timeout,
    })
  }

  async fn call<P, R>(&self, method: &str, params: &P) -> AppResult<R>
  where
    P: Serialize + ?Sized,
    R: DeserializeOwned,
  {
    // without_url(): the request URL carries the bot token.
    let response = self
      .http
      .post(format!("{}/{}", self.endpoint, method))
      .json(params)
      .send()
      .await
      .map_err(|e| AppError::Http(e.without_url()))?;
    let body: ApiResponse<R> = response.json().await.map_err(|e| AppError::Http(e.without_url()))?;
    decode_response(method, body)
  }

  #[instrument(name = "TelegramClient::get_me", skip(self), err(Display))]
  pub async fn get_me(&self) -> AppResult<User> {
    self.call("getMe", &serde_json::json!({})).await
  }

  /// Long-polls for updates with `update_id >= offset`.
  pub async fn get_updates(&self, offset: i64) -> AppResult<Vec<Update>> {
    let params = GetUpdatesParams {
      offset,
      timeout: self.poll_timeout.as_secs(),
      allowed_updates: &["message"],
    };
    let updates: Vec<Update> = self.call("getUpdates", &params).await?;
    debug!(offset, received = updates.len(), "Polled updates.");
    Ok(updates)
  }
}

fn decode_response<R>(method: &str, body: ApiResponse<R>) -> AppResult<R> {
  match body {
    ApiResponse {
      ok: true,
      result: Some(result),
      ..
    } => Ok(result),
    ApiResponse {
      ok: true, result: None, ..
    } => Err(AppError::Telegram(format!("{}: response without result", method))),
    ApiResponse {
      description,
      error_code,
      ..
    } => Err(AppError::Telegram(format!(
      "{} failed ({}): {}",
      method,
      error_code.map_or_else(|| "no code".to_string(), |c| c.to_string()),
      description.unwrap_or_else(|| "no description".to_string())
    ))),
  }
}

#[async_trait]
impl ReplySink for TelegramClient {
  async fn send(&self, message: OutgoingMessage) -> AppResult<()> {
    let _sent: serde_json::Value = self.call("sendMessage", &message).await?;
    Ok(())
  }
}
