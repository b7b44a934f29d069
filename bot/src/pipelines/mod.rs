// pricehound_bot/src/pipelines/mod.rs

//! The per-message lookup workflow, expressed as pricehound pipeline steps.

pub mod common_steps;
pub mod contexts;
pub mod lookup_pipeline;
