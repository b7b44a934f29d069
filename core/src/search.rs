// pricehound/src/search.rs

//! Client for the marketplace "similar products" search endpoint.

use crate::catalog::{Product, SearchResult};
use crate::error::{LookupError, LookupResult};
use async_trait::async_trait;
use reqwest::header;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Placeholder in the URL template that receives the encoded query.
pub const QUERY_PLACEHOLDER: &str = "{query}";

pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://recom.wb.ru/recom/sng/common/v8/search?ab_testing=false&appType=1&curr=byn&dest=-59202&hide_dtype=10;13;14&lang=ru&page=1&query={query}&resultset=catalog&spp=30&suppressSpellcheck=false";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (PriceTrackerBot/1.0)";

pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(15);

/// The marketplace's "similar to" search prefix.
const SIMILAR_PREFIX: &str = "похожие";

/// Search query asking for products similar to `product_id`.
pub fn similar_query(product_id: &str) -> String {
  format!("{} {}", SIMILAR_PREFIX, product_id)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
  pub url_template: String,
  pub user_agent: String,
  pub timeout: Duration,
}

impl Default for SearchSettings {
  fn default() -> Self {
    Self {
      url_template: DEFAULT_SEARCH_TEMPLATE.to_string(),
      user_agent: DEFAULT_USER_AGENT.to_string(),
      timeout: DEFAULT_SEARCH_TIMEOUT,
    }
  }
}

impl SearchSettings {
  pub fn validate(&self) -> LookupResult<()> {
    if !self.url_template.contains(QUERY_PLACEHOLDER) {
      return Err(LookupError::Settings(format!(
        "search URL template must contain {}",
        QUERY_PLACEHOLDER
      )));
    }
    if self.timeout.is_zero() {
      return Err(LookupError::Settings("search timeout must be positive".to_string()));
    }
    Ok(())
  }

  /// Full request URL for the products similar to `product_id`.
  pub fn search_url(&self, product_id: &str) -> String {
    let encoded = urlencoding::encode(&similar_query(product_id)).into_owned();
    self.url_template.replace(QUERY_PLACEHOLDER, &encoded)
  }
}

/// Source of "similar products" for a given product id.
#[async_trait]
pub trait SimilarProducts: Send + Sync {
  /// An empty list is a valid answer, not an error.
  async fn similar_products(&self, product_id: &str) -> LookupResult<Vec<Product>>;
}

/// reqwest-backed `SimilarProducts`. One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct SearchClient {
  client: reqwest::Client,
  settings: SearchSettings,
}

impl SearchClient {
  pub fn new(settings: SearchSettings) -> LookupResult<Self> {
    settings.validate()?;
    let client = reqwest::Client::builder()
      .timeout(settings.timeout)
      .user_agent(settings.user_agent.clone())
      .build()
      .map_err(LookupError::Transport)?;
    Ok(Self { client, settings })
  }

  /// Performs the search and decodes the whole payload.
  #[instrument(name = "SearchClient::search", skip(self), err(Display))]
  pub async fn search(&self, product_id: &str) -> LookupResult<SearchResult> {
    let url = self.settings.search_url(product_id);
    debug!(%url, "Requesting similar products.");

    let response = self
      .client
      .get(&url)
      .header(header::ACCEPT, "application/json")
      .send()
      .await
      .map_err(LookupError::Transport)?;

    let status = response.status();
    if !status.is_success() {
      warn!(%status, "Search API answered with an error status.");
      return Err(LookupError::UpstreamStatus { status });
    }

    let body = response.bytes().await.map_err(LookupError::Transport)?;
    let result: SearchResult = serde_json::from_slice(&body).map_err(LookupError::Decode)?;
    debug!(products = result.products.len(), total = result.total, "Search response decoded.");
    Ok(result)
  }
}

#[async_trait]
impl SimilarProducts for SearchClient {
  async fn similar_products(&self, product_id: &str) -> LookupResult<Vec<Product>> {
    Ok(self.search(product_id).await?.products)
  }
}
