// pricehound_bot/src/services/replies.rs

//! The outbound side of the bot, kept behind a trait so the lookup pipeline
//! can be driven without a live Telegram connection.

use crate::errors::Result as AppResult;
use async_trait::async_trait;
use serde::Serialize;

/// Telegram's legacy Markdown flavour.
pub const PARSE_MODE_MARKDOWN: &str = "Markdown";

/// Body of a `sendMessage` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
  pub chat_id: i64,
  pub text: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parse_mode: Option<&'static str>,
}

impl OutgoingMessage {
  pub fn plain(chat_id: i64, text: impl Into<String>) -> Self {
    Self {
      chat_id,
      text: text.into(),
      parse_mode: None,
    }
  }

  pub fn markdown(chat_id: i64, text: impl Into<String>) -> Self {
    Self {
      chat_id,
      text: text.into(),
      parse_mode: Some(PARSE_MODE_MARKDOWN),
    }
  }
}

#[async_trait]
pub trait ReplySink: Send + Sync {
  async fn send(&self, message: OutgoingMessage) -> AppResult<()>;
}
