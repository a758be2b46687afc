// shopcart/src/pipeline/hooks.rs

//! Handler registration.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use crate::error::CartError;
use crate::pipeline::definition::{Handler, Pipeline};
use std::future::Future;

impl<TData> Pipeline<TData>
where
  TData: 'static + Send + Sync,
{
  /// Attaches a handler to `step_name`.
  ///
  /// The handler may fail with any error convertible into [`CartError`].
  pub fn on_step<F, E>(&mut self, step_name: &str, handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<PipelineControl, E>> + Send + 'static,
    E: Into<CartError> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let handler: Handler<TData> = Box::new(move |ctx_data| {
      let fut = handler_fn(ctx_data);
      Box::pin(async move { fut.await.map_err(Into::into) })
    });
    self.handlers.entry(step_name.to_string()).or_default().push(handler);
  }
}
