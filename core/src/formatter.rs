// pricehound/src/formatter.rs

//! Reply texts. Everything user-facing lives here.

use crate::catalog::Product;

pub const INVALID_LINK_MESSAGE: &str = "❌ Неверная ссылка Wildberries. Отправьте корректную ссылку на товар.";
pub const HELP_MESSAGE: &str =
  "🦾 Этот бот помогает находить похожие товары с самой минимальной ценой. Отправьте корректную ссылку на товар.";
pub const SEARCHING_MESSAGE: &str = "🔍 Ищу похожие товары...";
pub const NOTHING_FOUND_MESSAGE: &str = "😔 Не удалось найти похожие товары.";
pub const UNAVAILABLE_MESSAGE: &str = "Информация о товаре недоступна";

const SEARCH_FAILED_PREFIX: &str = "❌ Ошибка при поиске товаров: ";
const DETAIL_URL_PREFIX: &str = "https://www.wildberries.by/catalog/";
const DETAIL_URL_SUFFIX: &str = "/detail.aspx";

/// Product page on the marketplace.
pub fn detail_url(product_id: u64) -> String {
  format!("{}{}{}", DETAIL_URL_PREFIX, product_id, DETAIL_URL_SUFFIX)
}

/// Renders minor units as `units.hundredths`, e.g. `1300` -> `13.00`.
pub fn display_price(minor_units: u64) -> String {
  format!("{}.{:02}", minor_units / 100, minor_units % 100)
}

/// Escapes the characters that open entities in Telegram's legacy Markdown.
pub fn escape_markdown(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for ch in text.chars() {
    if matches!(ch, '_' | '*' | '`' | '[') {
      escaped.push('\\');
    }
    escaped.push(ch);
  }
  escaped
}

pub fn search_failed_message(cause: &dyn std::fmt::Display) -> String {
  format!("{}{}", SEARCH_FAILED_PREFIX, escape_markdown(&cause.to_string()))
}

/// The result message for the cheapest product.
///
/// Returns `UNAVAILABLE_MESSAGE` untouched when there is no product or it has
/// no sizes to price.
pub fn format_product(product: Option<&Product>) -> String {
  let Some((product, total)) = product.and_then(|p| p.total_price().map(|t| (p, t))) else {
    return UNAVAILABLE_MESSAGE.to_string();
  };

  format!(
    "🎯 *Самый дешевый похожий товар:*\n\n\
     🏷️ *Бренд:* {brand}\n\
     📦 *Название:* {name}\n\
     ⭐ *Рейтинг:* {rating:.1}/5\n\
     💬 *Отзывов:* {feedbacks}\n\
     🏪 *Продавец:* {supplier}\n\
     \n💵 *Цена:*\n\
     \x20  🎯 *Итого: {price} руб.*\n\
     \n🔗 *Ссылка:*\n\
     {link}",
    brand = escape_markdown(&product.brand),
    name = escape_markdown(&product.name),
    rating = product.review_rating,
    feedbacks = product.feedbacks,
    supplier = escape_markdown(&product.supplier),
    price = display_price(total),
    link = detail_url(product.id),
  )
}
