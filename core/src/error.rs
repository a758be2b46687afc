// shopcart/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::model::{ItemId, Notice};

#[derive(Debug, Error)]
pub enum CartError {
  /// The catalog has no row for this id. Aborts the operation before anything is mutated.
  #[error("Item not found in catalog: {item_id}")]
  ItemNotFound { item_id: ItemId },

  /// The ledger has no counter for this id. Decrease and remove treat it as a no-op.
  #[error("No cart ledger entry for item: {item_id}")]
  LedgerEntryNotFound { item_id: ItemId },

  /// Price times quantity, or the cart total, does not fit in an `i64`.
  #[error("Cart amount overflows for item: {item_id}")]
  AmountOverflow { item_id: ItemId },

  #[error("Persistence failure. Source: {source}")]
  Persistence {
    #[source]
    source: AnyhowError,
  },

  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Handler missing for step '{step_name}' of pipeline '{pipeline}'")]
  HandlerMissing { pipeline: String, step_name: String },
}

impl CartError {
  /// Wraps a store error (for instance `sqlx::Error`) as a persistence failure.
  pub fn persistence<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    CartError::Persistence {
      source: AnyhowError::new(err),
    }
  }

  /// The user-facing notice for errors the storefront reports as a notice
  /// rather than a failure page.
  pub fn notice(&self) -> Option<Notice> {
    match self {
      CartError::ItemNotFound { .. } => Some(Notice::item_not_found()),
      _ => None,
    }
  }
}

impl From<AnyhowError> for CartError {
  fn from(err: AnyhowError) -> Self {
    // Don't bury an already tagged error under a Persistence wrapper.
    match err.downcast::<CartError>() {
      Ok(cart_err) => cart_err,
      Err(source) => CartError::Persistence { source },
    }
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
