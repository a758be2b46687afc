// shopcart/src/core/mod.rs

//! Building blocks the pipelines are made of: shared context and flow control.

pub mod context_data;
pub mod control;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
