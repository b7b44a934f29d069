// pricehound_bot/src/pipelines/contexts.rs

//! Underlying data for the lookup pipeline. Handlers receive it wrapped in
//! `pricehound::ContextData`.

use crate::dispatcher::InboundMessage;
use crate::state::AppState;
use pricehound::Product;

#[derive(Clone)]
pub struct LookupCtxData {
  pub app_state: AppState,
  pub chat_id: i64,
  pub text: String,
  pub product_id: Option<String>,
  pub candidates: Vec<Product>,
  pub cheapest: Option<Product>,
  pub replies_sent: usize,
}

impl LookupCtxData {
  pub fn new(app_state: AppState, message: InboundMessage) -> Self {
    Self {
      app_state,
      chat_id: message.chat_id,
      text: message.text,
      product_id: None,
      candidates: Vec::new(),
      cheapest: None,
      replies_sent: 0,
    }
  }
}
