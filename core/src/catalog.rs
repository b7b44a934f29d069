// pricehound/src/catalog.rs

//! Typed shape of the marketplace search response.
//!
//! Only the fields the bot reads are modelled; anything else in the payload is
//! ignored. Missing and `null` fields fall back to their zero value.

use serde::{Deserialize, Deserializer};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchResult {
  #[serde(deserialize_with = "null_as_default")]
  pub products: Vec<Product>,
  #[serde(deserialize_with = "null_as_default")]
  pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Product {
  #[serde(deserialize_with = "null_as_default")]
  pub id: u64,
  #[serde(deserialize_with = "null_as_default")]
  pub brand: String,
  #[serde(deserialize_with = "null_as_default")]
  pub name: String,
  #[serde(rename = "reviewRating", deserialize_with = "null_as_default")]
  pub review_rating: f32,
  #[serde(deserialize_with = "null_as_default")]
  pub feedbacks: u64,
  #[serde(deserialize_with = "null_as_default")]
  pub supplier: String,
  #[serde(deserialize_with = "null_as_default")]
  pub sizes: Vec<Size>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Size {
  #[serde(deserialize_with = "null_as_default")]
  pub price: Price,
}

/// Price breakdown in minor currency units (1/100).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Price {
  #[serde(deserialize_with = "null_as_default")]
  pub basic: u64,
  #[serde(deserialize_with = "null_as_default")]
  pub product: u64,
  #[serde(deserialize_with = "null_as_default")]
  pub logistics: u64,
}

impl Price {
  /// Saturates instead of overflowing on absurd payloads.
  pub fn total(&self) -> u64 {
    self.product.saturating_add(self.logistics)
  }
}

impl Product {
  /// Final price (product + logistics) of the first size, if the product has one.
  pub fn total_price(&self) -> Option<u64> {
    self.sizes.first().map(|size| size.price.total())
  }
}
