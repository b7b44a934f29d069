// pricehound/src/link.rs

use crate::error::{LookupError, LookupResult};
use once_cell::sync::Lazy;
use regex::Regex;

static CATALOG_LINK: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"wildberries\.(by|ru|kz|com)/catalog/(\d+)/").expect("catalog link pattern is valid")
});

/// Pulls the numeric product id out of a Wildberries product link.
///
/// The text may contain anything around the link; the first
/// `wildberries.<tld>/catalog/<digits>/` occurrence wins.
pub fn extract_product_id(text: &str) -> LookupResult<String> {
  CATALOG_LINK
    .captures(text)
    .and_then(|caps| caps.get(2))
    .map(|id| id.as_str().to_string())
    .ok_or(LookupError::InvalidLink)
}
