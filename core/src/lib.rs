// pricehound/src/lib.rs

//! pricehound: finds the cheapest product similar to a Wildberries link.
//!
//! The crate has two halves:
//!  - `pipeline`: a small async step engine (named steps, before/on/after
//!    handlers over a shared `ContextData`, skip conditions, early stop).
//!  - the lookup pieces the bot wires into that engine: `link` extracts the
//!    product id, `search` queries the similar-products endpoint, `selector`
//!    picks the cheapest result and `formatter` renders the reply.

pub mod catalog;
pub mod error;
pub mod formatter;
pub mod link;
pub mod pipeline;
pub mod search;
pub mod selector;

pub use crate::pipeline::{ContextData, Handler, Pipeline, PipelineControl, PipelineResult, SkipCondition, StepDef};

pub use crate::catalog::{Price, Product, SearchResult, Size};
pub use crate::error::{LookupError, LookupResult, PipelineError};
pub use crate::formatter::format_product;
pub use crate::link::extract_product_id;
pub use crate::search::{SearchClient, SearchSettings, SimilarProducts};
pub use crate::selector::select_cheapest;
