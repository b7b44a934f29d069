// pricehound/src/pipeline/step.rs

use super::ContextData;
use std::sync::Arc;

/// Evaluated right before a step runs; `true` skips the step.
pub type SkipCondition<TData> = Arc<dyn Fn(&ContextData<TData>) -> bool + Send + Sync + 'static>;

/// A named slot in a pipeline.
#[derive(Clone)]
pub struct StepDef<TData: 'static + Send + Sync> {
  pub name: String,
  /// An optional step without handlers is silently skipped instead of failing the run.
  pub optional: bool,
  pub skip_if: Option<SkipCondition<TData>>,
}

impl<TData: 'static + Send + Sync> StepDef<TData> {
  pub fn new(name: impl Into<String>, optional: bool, skip_if: Option<SkipCondition<TData>>) -> Self {
    Self {
      name: name.into(),
      optional,
      skip_if,
    }
  }
}

impl<TData: 'static + Send + Sync> std::fmt::Debug for StepDef<TData> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
