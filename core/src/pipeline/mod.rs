// pricehound/src/pipeline/mod.rs

//! A small async step pipeline: named steps, before/on/after handlers over a
//! shared `ContextData<T>`, skip conditions and early stop.

pub mod context_data;
pub mod control;
pub mod definition;
pub mod execution;
pub mod hooks;
pub mod step;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use definition::{Handler, Pipeline};
pub use step::{SkipCondition, StepDef};
