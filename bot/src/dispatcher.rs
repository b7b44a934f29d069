// pricehound_bot/src/dispatcher.rs

//! Turns the inbound update stream into one lookup task per message.

use crate::errors::AppError;
use crate::pipelines::contexts::LookupCtxData;
use crate::pipelines::lookup_pipeline::build_lookup_pipeline;
use crate::services::telegram::{Message, TelegramClient};
use crate::state::AppState;
use pricehound::{ContextData, Pipeline};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

const POLL_RETRY_DELAY: Duration = Duration::from_secs(3);

/// The parts of a chat message the bot cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
  pub chat_id: i64,
  pub text: String,
  pub is_command: bool,
}

/// What `Dispatcher::dispatch_until` did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
  Spawned,
  Ignored,
  ShutDown,
}

pub struct Dispatcher {
  state: AppState,
  pipeline: Arc<Pipeline<LookupCtxData, AppError>>,
  /// Present only when `MAX_CONCURRENT_LOOKUPS` is set.
  limiter: Option<Arc<Semaphore>>,
}

impl Dispatcher {
  pub fn new(state: AppState) -> Self {
    let limiter = state
      .config
      .max_concurrent_lookups
      .map(|permits| Arc::new(Semaphore::new(permits)));
    Self {
      state,
      pipeline: Arc::new(build_lookup_pipeline()),
      limiter,
    }
  }

  /// Spawns a lookup for `message` into `tasks`.
  ///
  /// Returns `false` for messages the bot ignores (commands, empty text).
  /// With a concurrency cap this waits for a free slot before spawning.
  pub async fn dispatch(&self, tasks: &mut JoinSet<()>, message: InboundMessage) -> bool {
    self.dispatch_until(tasks, message, std::future::pending::<()>()).await == Dispatch::Spawned
  }

  /// Like `dispatch`, but gives up waiting for a free slot once `shutdown`
  /// resolves.
  pub async fn dispatch_until<S>(&self, tasks: &mut JoinSet<()>, message: InboundMessage, shutdown: S) -> Dispatch
  where
    S: Future,
  {
    if message.is_command || message.text.is_empty() {
      debug!(chat_id = message.chat_id, "Ignoring command or empty message.");
      return Dispatch::Ignored;
    }

    let permit = match &self.limiter {
      Some(limiter) => {
        let acquired = tokio::select! {
          _ = shutdown => {
            info!(chat_id = message.chat_id, "Shutdown while waiting for a lookup slot.");
            return Dispatch::ShutDown;
          }
          acquired = limiter.clone().acquire_owned() => acquired,
        };
        match acquired {
          Ok(permit) => Some(permit),
          Err(_) => {
            error!("Lookup limiter closed; dropping message.");
            return Dispatch::Ignored;
          }
        }
      }
      None => None,
    };

    tasks.spawn(run_lookup(self.pipeline.clone(), self.state.clone(), message, permit));
    Dispatch::Spawned
  }

  /// Long-polls Telegram until Ctrl-C, then waits for in-flight lookups.
  pub async fn run(&self, telegram: &TelegramClient) {
    let mut offset = 0i64;
    let mut tasks = JoinSet::new();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!("Polling for updates.");
    'poll: loop {
      while tasks.try_join_next().is_some() {}

      let polled = tokio::select! {
        _ = &mut shutdown => break 'poll,
        polled = telegram.get_updates(offset) => polled,
      };

      let updates = match polled {
        Ok(updates) => updates,
        Err(e) => {
          error!(error = %e, "Failed to get updates, retrying in 3 seconds...");
          let stop = tokio::select! {
            _ = &mut shutdown => true,
            _ = tokio::time::sleep(POLL_RETRY_DELAY) => false,
          };
          if stop {
            break 'poll;
          }
          continue;
        }
      };

      for update in updates {
        offset = offset.max(update.update_id + 1);
        if let Some(message) = update.message.as_ref().and_then(Message::inbound) {
          if self.dispatch_until(&mut tasks, message, &mut shutdown).await == Dispatch::ShutDown {
            break 'poll;
          }
        }
      }
    }

    info!(in_flight = tasks.len(), "Shutdown requested, waiting for in-flight lookups.");
    while tasks.join_next().await.is_some() {}
  }
}

async fn run_lookup(
  pipeline: Arc<Pipeline<LookupCtxData, AppError>>,
  state: AppState,
  message: InboundMessage,
  _permit: Option<OwnedSemaphorePermit>,
) {
  let lookup_id = Uuid::new_v4();
  let span = info_span!("lookup", %lookup_id, chat_id = message.chat_id);

  async move {
    debug!(text = %message.text, "Handling message.");
    let ctx_data = ContextData::new(LookupCtxData::new(state, message));
    let outcome = pipeline.run(ctx_data.clone()).await;
    let replies_sent = ctx_data.with_read(|data| data.replies_sent);
    match outcome {
      Ok(result) => info!(?result, replies_sent, "Lookup finished."),
      Err(e) => error!(error = %e, replies_sent, "Lookup failed."),
    }
  }
  .instrument(span)
  .await
}
