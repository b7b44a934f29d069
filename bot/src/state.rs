// pricehound_bot/src/state.rs
use crate::config::AppConfig;
use crate::services::replies::ReplySink;
use pricehound::SimilarProducts;
use std::sync::Arc;

/// Everything a lookup needs, shared read-only across tasks.
#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub search: Arc<dyn SimilarProducts>,
  pub replies: Arc<dyn ReplySink>,
}
