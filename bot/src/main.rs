// pricehound_bot/src/main.rs

mod config;
mod dispatcher;
mod errors;
mod pipelines;
mod services;
mod state;

use crate::config::AppConfig;
use crate::dispatcher::Dispatcher;
use crate::services::telegram::TelegramClient;
use crate::state::AppState;

use anyhow::Context;
use pricehound::SearchClient;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
  // RUST_LOG overrides the default level; LOG_FORMAT=json switches to JSON lines.
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let json = std::env::var("LOG_FORMAT").map_or(false, |format| format.eq_ignore_ascii_case("json"));

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE);
  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  init_tracing();
  tracing::info!("Starting price lookup bot...");

  let app_config = Arc::new(AppConfig::from_env().context("failed to load configuration")?);
  tracing::debug!(config = ?app_config, "Configuration loaded.");

  let search = SearchClient::new(app_config.search.clone()).context("failed to build search client")?;
  let telegram = Arc::new(TelegramClient::new(&app_config).context("failed to build Telegram client")?);

  let me = telegram.get_me().await.context("failed to authorize with the Bot API")?;
  tracing::info!(
    bot_id = me.id,
    username = me.username.as_deref().unwrap_or(&me.first_name),
    "Authorized on account."
  );

  let app_state = AppState {
    config: app_config.clone(),
    search: Arc::new(search),
    replies: telegram.clone(),
  };

  Dispatcher::new(app_state).run(&telegram).await;

  tracing::info!("Bot stopped.");
  Ok(())
}
