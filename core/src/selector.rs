// pricehound/src/selector.rs

use crate::catalog::Product;

/// Picks the product with the lowest first-size total (product + logistics).
///
/// Products without sizes are ignored. On equal totals the earlier product
/// is kept. `None` when no product carries a price.
pub fn select_cheapest(products: &[Product]) -> Option<&Product> {
  let mut cheapest: Option<(&Product, u64)> = None;
  for product in products {
    let Some(total) = product.total_price() else {
      continue;
    };
    match cheapest {
      Some((_, best)) if total >= best => {}
      _ => cheapest = Some((product, total)),
    }
  }
  cheapest.map(|(product, _)| product)
}
