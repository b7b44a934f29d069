// pricehound/src/pipeline/definition.rs

//! The `Pipeline<TData, Err>` struct and its structural editing methods.

use super::context_data::ContextData;
use super::control::PipelineControl;
use super::step::{SkipCondition, StepDef};
use crate::error::PipelineError;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// An async step handler.
///
/// Receives its own clone of the run's `ContextData` and resolves to a flow
/// signal or the pipeline's error type. Lock guards taken inside must not
/// live across an `.await`.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;

/// Handlers attached to one step, grouped by phase.
pub(crate) struct StepHandlers<TData, Err>
where
  TData: 'static + Send + Sync,
{
  pub(crate) before: Vec<Handler<TData, Err>>,
  pub(crate) on: Vec<Handler<TData, Err>>,
  pub(crate) after: Vec<Handler<TData, Err>>,
}

impl<TData, Err> StepHandlers<TData, Err>
where
  TData: 'static + Send + Sync,
{
  fn empty() -> Self {
    Self {
      before: Vec::new(),
      on: Vec::new(),
      after: Vec::new(),
    }
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.before.is_empty() && self.on.is_empty() && self.after.is_empty()
  }

  /// Phases in execution order, labelled for tracing.
  pub(crate) fn phases(&self) -> [(&'static str, &[Handler<TData, Err>]); 3] {
    [("before", &self.before), ("on", &self.on), ("after", &self.after)]
  }
}

/// An ordered list of named steps over root data `TData`.
///
/// `Err` is whatever the handlers return; it must absorb `PipelineError` so
/// the engine can report setup problems (e.g. a required step with no
/// handlers) through the same channel.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef<TData>>,
  pub(crate) handlers: HashMap<String, StepHandlers<TData, Err>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Creates a pipeline from `(name, optional, skip_if)` tuples.
  pub fn new(step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional, skip_if)| StepDef::new(*name, *optional, skip_if.clone()))
      .collect();

    Self {
      steps,
      handlers: HashMap::new(),
    }
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  fn position(&self, step_name: &str) -> Option<usize> {
    self.steps.iter().position(|s| s.name == step_name)
  }

  /// Panics on an unknown step name: that is a wiring bug, not a runtime condition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if self.position(step_name).is_none() {
      panic!("pipeline setup error: step '{}' is not defined", step_name);
    }
  }

  pub(crate) fn handlers_mut(&mut self, step_name: &str) -> &mut StepHandlers<TData, Err> {
    self.ensure_step_exists(step_name);
    self
      .handlers
      .entry(step_name.to_string())
      .or_insert_with(StepHandlers::empty)
  }

  pub fn insert_after_step(
    &mut self,
    existing_step_name: &str,
    new_step_name: impl Into<String>,
    optional: bool,
    skip_if: Option<SkipCondition<TData>>,
  ) -> Result<(), PipelineError> {
    let idx = self.position(existing_step_name).ok_or_else(|| PipelineError::StepNotFound {
      step_name: existing_step_name.to_string(),
    })?;
    let new_step_name = new_step_name.into();
    if self.position(&new_step_name).is_some() {
      return Err(PipelineError::DuplicateStep { step_name: new_step_name });
    }
    self.steps.insert(idx + 1, StepDef::new(new_step_name, optional, skip_if));
    Ok(())
  }

  /// Removes a step together with its handlers. Unknown names are a no-op.
  pub fn remove_step(&mut self, step_name: &str) {
    if let Some(idx) = self.position(step_name) {
      self.steps.remove(idx);
      self.handlers.remove(step_name);
    }
  }
}
