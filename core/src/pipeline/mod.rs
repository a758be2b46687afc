// shopcart/src/pipeline/mod.rs

//! The `Pipeline<TData>` type: construction, handler registration and execution.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::{Handler, Pipeline};
