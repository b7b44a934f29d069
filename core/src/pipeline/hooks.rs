// pricehound/src/pipeline/hooks.rs

//! Registration of `before`, `on` and `after` handlers.

use super::context_data::ContextData;
use super::control::PipelineControl;
use super::definition::{Handler, Pipeline};
use crate::error::PipelineError;
use std::future::Future;

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Wraps a user closure whose error converts into the pipeline's `Err`.
  fn box_handler<F, UserErr>(handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static) -> Handler<TData, Err>
  where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    Box::new(move |ctx_data| {
      let user_fut = handler_fn(ctx_data);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    })
  }

  pub fn before_root<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    let handler = Self::box_handler(handler_fn);
    self.handlers_mut(step_name).before.push(handler);
  }

  /// Registers the main handler of a step. Several `on` handlers run in
  /// registration order.
  pub fn on_root<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    let handler = Self::box_handler(handler_fn);
    self.handlers_mut(step_name).on.push(handler);
  }

  pub fn after_root<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    let handler = Self::box_handler(handler_fn);
    self.handlers_mut(step_name).after.push(handler);
  }
}
