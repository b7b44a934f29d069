// pricehound_bot/src/pipelines/common_steps.rs
use crate::errors::Result as AppResult;
use crate::pipelines::contexts::LookupCtxData;
use crate::services::replies::OutgoingMessage;
use pricehound::ContextData;
use tracing::{debug, instrument, warn};

/// Sends one reply to the chat the lookup came from and counts it.
#[instrument(name = "common_step::send_reply", skip(ctx_data, text))]
pub async fn send_reply(ctx_data: &ContextData<LookupCtxData>, text: &str, markdown: bool) -> AppResult<()> {
  let (replies, chat_id) = ctx_data.with_read(|data| (data.app_state.replies.clone(), data.chat_id));
  let message = if markdown {
    OutgoingMessage::markdown(chat_id, text)
  } else {
    OutgoingMessage::plain(chat_id, text)
  };

  if let Err(e) = replies.send(message).await {
    warn!(chat_id, error = %e, "Failed to deliver reply.");
    return Err(e);
  }
  let sent = ctx_data.with_write(|data| {
    data.replies_sent += 1;
    data.replies_sent
  });
  debug!(chat_id, sent, "Reply delivered.");
  Ok(())
}
