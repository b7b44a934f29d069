// pricehound/src/pipeline/execution.rs

//! `Pipeline::run`.

use super::context_data::ContextData;
use super::control::{PipelineControl, PipelineResult};
use super::definition::Pipeline;
use super::step::StepDef;
use crate::error::PipelineError;
use tracing::{debug, error, info, info_span, instrument, trace, Instrument};

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Runs every step in order against `ctx_data`.
  ///
  /// Handler errors are returned as-is. A non-optional step without any
  /// handler fails with `PipelineError::HandlerMissing` converted into `Err`.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      context_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    debug!("Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_span = info_span!("pipeline_step", step_name = %step_def.name, step_index = step_idx);
      let control = self.run_step(step_def, &ctx_data).instrument(step_span).await?;
      if control == PipelineControl::Stop {
        return Ok(PipelineResult::Stopped);
      }
    }

    debug!("Pipeline execution completed.");
    Ok(PipelineResult::Completed)
  }

  async fn run_step(&self, step_def: &StepDef<TData>, ctx_data: &ContextData<TData>) -> Result<PipelineControl, Err> {
    if let Some(skip_if) = &step_def.skip_if {
      if skip_if(ctx_data) {
        info!("Step skipped by its skip condition.");
        return Ok(PipelineControl::Continue);
      }
    }

    let handlers = match self.handlers.get(&step_def.name).filter(|h| !h.is_empty()) {
      Some(handlers) => handlers,
      None if step_def.optional => {
        debug!("Optional step has no handlers, skipping.");
        return Ok(PipelineControl::Continue);
      }
      None => {
        error!("Non-optional step has no handlers.");
        return Err(Err::from(PipelineError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }
    };

    for (phase, phase_handlers) in handlers.phases() {
      for (handler_idx, handler_fn) in phase_handlers.iter().enumerate() {
        trace!(phase, handler_idx, "Executing handler.");
        match handler_fn(ctx_data.clone()).await {
          Ok(PipelineControl::Continue) => {}
          Ok(PipelineControl::Stop) => {
            info!(phase, handler_idx, "Pipeline stopped by a handler.");
            return Ok(PipelineControl::Stop);
          }
          Err(e) => {
            error!(phase, handler_idx, error = %e, "Handler failed.");
            return Err(e);
          }
        }
      }
    }

    Ok(PipelineControl::Continue)
  }
}
