// pricehound_bot/src/services/mod.rs

pub mod replies;
pub mod telegram;
