// shopcart/src/cart/contexts.rs

//! Data the cart pipelines run over. Handlers receive these wrapped in `ContextData`.

use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::ledger::CartLedger;
use crate::model::{Item, ItemId, LedgerEntry};
use crate::session::SessionCartList;

/// Store handles every cart context carries.
#[derive(Clone)]
pub struct Stores {
  pub catalog: Arc<dyn CatalogStore>,
  pub ledger: Arc<dyn CartLedger>,
}

pub struct AddToCartCtxData {
  pub stores: Stores,
  pub item_id: ItemId,
  /// Starts as the caller's list; holds the appended list once the last step ran.
  pub session: SessionCartList,
  pub item: Option<Item>,
  pub ledger_entry: Option<LedgerEntry>,
}

impl AddToCartCtxData {
  pub fn new(stores: Stores, session: SessionCartList, item_id: ItemId) -> Self {
    Self {
      stores,
      item_id,
      session,
      item: None,
      ledger_entry: None,
    }
  }
}

pub struct RemoveFromCartCtxData {
  pub stores: Stores,
  pub item_id: ItemId,
  pub session: SessionCartList,
  /// Set by the first step; `false` halts the pipeline with nothing mutated.
  pub removed_from_session: bool,
  /// The row after the decrement, when there was one to decrement.
  pub ledger_entry: Option<LedgerEntry>,
}

impl RemoveFromCartCtxData {
  pub fn new(stores: Stores, session: SessionCartList, item_id: ItemId) -> Self {
    Self {
      stores,
      item_id,
      session,
      removed_from_session: false,
      ledger_entry: None,
    }
  }
}
