// shopcart/src/pipeline/definition.rs

//! The `Pipeline<TData>` struct and its step layout.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use crate::error::CartResult;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// A step handler: takes a clone of the shared context and resolves to a flow signal.
pub type Handler<TData> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = CartResult<PipelineControl>> + Send>>
    + Send
    + Sync,
>;

/// Named steps executed in order over a `ContextData<TData>`.
///
/// Handlers are attached per step with [`Pipeline::on_step`]; a step may carry several,
/// run in registration order. Every step must have at least one handler by the time the
/// pipeline runs.
pub struct Pipeline<TData>
where
  TData: 'static + Send + Sync,
{
  pub(crate) name: String,
  pub(crate) steps: Vec<String>,
  pub(crate) handlers: HashMap<String, Vec<Handler<TData>>>,
}

impl<TData> Pipeline<TData>
where
  TData: 'static + Send + Sync,
{
  pub fn new(name: &str, step_names: &[&str]) -> Self {
    Self {
      name: name.to_string(),
      steps: step_names.iter().map(|s| (*s).to_string()).collect(),
      handlers: HashMap::new(),
    }
  }

  pub fn step_names(&self) -> impl Iterator<Item = &str> + '_ {
    self.steps.iter().map(String::as_str)
  }

  /// Panics on an unknown step name: that is a wiring mistake, not a runtime condition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s == step_name) {
      panic!(
        "Pipeline '{}' setup error: step '{}' is not defined.",
        self.name, step_name
      );
    }
  }
}
