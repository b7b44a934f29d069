// pricehound_bot/src/pipelines/lookup_pipeline.rs

use crate::errors::{AppError, Result as AppResult};
use crate::pipelines::common_steps::send_reply;
use crate::pipelines::contexts::LookupCtxData;
use pricehound::formatter::{
  search_failed_message, HELP_MESSAGE, INVALID_LINK_MESSAGE, NOTHING_FOUND_MESSAGE, SEARCHING_MESSAGE,
};
use pricehound::{extract_product_id, format_product, select_cheapest, ContextData, Pipeline, PipelineControl};
use tracing::{debug, info, instrument, warn};

pub const STEP_EXTRACT_PRODUCT_ID: &str = "extract_product_id";
pub const STEP_ANNOUNCE_SEARCH: &str = "announce_search";
pub const STEP_SEARCH_SIMILAR: &str = "search_similar";
pub const STEP_SELECT_CHEAPEST: &str = "select_cheapest";
pub const STEP_SEND_RESULT: &str = "send_result";

/// Builds the lookup pipeline once; it is shared by every message task.
///
/// Each early exit (bad link, failed search, nothing found) sends its own
/// reply and stops the run, so every inbound message ends with a reply.
pub fn build_lookup_pipeline() -> Pipeline<LookupCtxData, AppError> {
  let mut lookup_p = Pipeline::<LookupCtxData, AppError>::new(&[
    (STEP_EXTRACT_PRODUCT_ID, false, None),
    (STEP_ANNOUNCE_SEARCH, false, None),
    (STEP_SEARCH_SIMILAR, false, None),
    (STEP_SELECT_CHEAPEST, false, None),
    (STEP_SEND_RESULT, false, None),
  ]);

  lookup_p.on_root(STEP_EXTRACT_PRODUCT_ID, extract_product_id_step);
  lookup_p.on_root(STEP_ANNOUNCE_SEARCH, announce_search_step);
  lookup_p.on_root(STEP_SEARCH_SIMILAR, search_similar_step);
  lookup_p.on_root(STEP_SELECT_CHEAPEST, select_cheapest_step);
  lookup_p.on_root(STEP_SEND_RESULT, send_result_step);

  lookup_p
}

#[instrument(name = "lookup::extract_product_id", skip_all)]
async fn extract_product_id_step(ctx_data: ContextData<LookupCtxData>) -> AppResult<PipelineControl> {
  let text = ctx_data.with_read(|data| data.text.clone());

  let outcome = extract_product_id(&text);
  match outcome {
    Ok(product_id) => {
      debug!(%product_id, "Product id extracted.");
      ctx_data.with_write(|data| data.product_id = Some(product_id));
      Ok(PipelineControl::Continue)
    }
    Err(e) => {
      info!(reason = %e, "Message is not a marketplace product link.");
      send_reply(&ctx_data, INVALID_LINK_MESSAGE, true).await?;
      send_reply(&ctx_data, HELP_MESSAGE, true).await?;
      Ok(PipelineControl::Stop)
    }
  }
}

async fn announce_search_step(ctx_data: ContextData<LookupCtxData>) -> AppResult<PipelineControl> {
  send_reply(&ctx_data, SEARCHING_MESSAGE, false).await?;
  Ok(PipelineControl::Continue)
}

#[instrument(name = "lookup::search_similar", skip_all, err(Display))]
async fn search_similar_step(ctx_data: ContextData<LookupCtxData>) -> AppResult<PipelineControl> {
  let (search, product_id) = ctx_data.with_read(|data| (data.app_state.search.clone(), data.product_id.clone()));
  let product_id = product_id.ok_or_else(|| AppError::Internal("product id missing before search".to_string()))?;

  let outcome = search.similar_products(&product_id).await;
  match outcome {
    Ok(products) => {
      info!(%product_id, candidates = products.len(), "Similar products received.");
      ctx_data.with_write(|data| data.candidates = products);
      Ok(PipelineControl::Continue)
    }
    Err(e) => {
      warn!(%product_id, error = %e, "Similar products search failed.");
      send_reply(&ctx_data, &search_failed_message(&e), true).await?;
      Ok(PipelineControl::Stop)
    }
  }
}

async fn select_cheapest_step(ctx_data: ContextData<LookupCtxData>) -> AppResult<PipelineControl> {
  let cheapest = ctx_data.with_read(|data| select_cheapest(&data.candidates).cloned());

  match cheapest {
    Some(product) => {
      info!(product_id = product.id, total = ?product.total_price(), "Cheapest candidate selected.");
      ctx_data.with_write(|data| data.cheapest = Some(product));
      Ok(PipelineControl::Continue)
    }
    None => {
      info!("No priced candidates.");
      send_reply(&ctx_data, NOTHING_FOUND_MESSAGE, true).await?;
      Ok(PipelineControl::Stop)
    }
  }
}

async fn send_result_step(ctx_data: ContextData<LookupCtxData>) -> AppResult<PipelineControl> {
  let text = ctx_data.with_read(|data| format_product(data.cheapest.as_ref()));
  send_reply(&ctx_data, &text, true).await?;
  Ok(PipelineControl::Continue)
}
