// pricehound/src/pipeline/control.rs

//! Flow signals returned by handlers and the outcome of a whole run.

/// Returned by every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  /// Keep going with the remaining handlers and steps.
  Continue,
  /// Halt the run right here. Nothing after this handler executes.
  Stop,
}

/// Outcome of `Pipeline::run` when no handler failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every step that was not skipped ran to the end.
  Completed,
  /// A handler returned `PipelineControl::Stop`.
  Stopped,
}
