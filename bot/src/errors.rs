// pricehound_bot/src/errors.rs

use pricehound::PipelineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  /// Telegram answered `ok: false`.
  #[error("Telegram API Error: {0}")]
  Telegram(String),

  #[error("HTTP Error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("Pipeline Error: {source}")]
  Workflow {
    #[from]
    source: PipelineError,
  },

  #[error("Internal Error: {0}")]
  Internal(String),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
