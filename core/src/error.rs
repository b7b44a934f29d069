// pricehound/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Errors raised by the step pipeline engine itself.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Step already exists: {step_name}")]
  DuplicateStep { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Error in handler or external operation. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal pipeline error: {0}")]
  Internal(String),
}

impl From<AnyhowError> for PipelineError {
  fn from(err: AnyhowError) -> Self {
    PipelineError::HandlerError { source: err }
  }
}

/// Why a price lookup could not produce a product list.
///
/// `Display` output is shown to the chat user, so it stays short.
#[derive(Debug, Error)]
pub enum LookupError {
  #[error("product id not found in link")]
  InvalidLink,

  #[error("search request failed: {0}")]
  Transport(#[source] reqwest::Error),

  #[error("API вернуло ошибку: {status}")]
  UpstreamStatus { status: reqwest::StatusCode },

  #[error("unexpected search response: {0}")]
  Decode(#[source] serde_json::Error),

  #[error("invalid search settings: {0}")]
  Settings(String),
}

impl LookupError {
  /// True for failures of the search call (transport, status, decode), as
  /// opposed to bad user input or bad configuration.
  pub fn is_search_failure(&self) -> bool {
    matches!(
      self,
      LookupError::Transport(_) | LookupError::UpstreamStatus { .. } | LookupError::Decode(_)
    )
  }
}

pub type LookupResult<T> = std::result::Result<T, LookupError>;
