// shopcart/src/cart/mod.rs

//! Cart transitions: the operations a shopper triggers from the storefront.
//!
//! Every transition takes the session list by reference and hands back the next list in a
//! [`CartUpdate`]; the caller decides where to store it. The catalog and the ledger are
//! injected trait objects.

pub mod add_to_cart;
pub mod contexts;
pub mod remove_from_cart;

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::cart::contexts::{AddToCartCtxData, RemoveFromCartCtxData, Stores};
use crate::catalog::CatalogStore;
use crate::core::ContextData;
use crate::error::{CartError, CartResult};
use crate::ledger::{CartLedger, QuantityChange};
use crate::model::{CartView, ItemId, LedgerEntry, Notice};
use crate::pipeline::Pipeline;
use crate::reconcile::render_cart;
use crate::session::SessionCartList;

/// Result of a transition that touches the session list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartUpdate {
  pub session: SessionCartList,
  pub notice: Notice,
  /// The ledger row after the transition, when it touched one.
  pub ledger_entry: Option<LedgerEntry>,
}

/// Runs cart transitions against one catalog and one (global) ledger.
pub struct CartService {
  stores: Stores,
  add_to_cart: Pipeline<AddToCartCtxData>,
  remove_from_cart: Pipeline<RemoveFromCartCtxData>,
}

impl CartService {
  pub fn new(catalog: Arc<dyn CatalogStore>, ledger: Arc<dyn CartLedger>) -> Self {
    let service = Self {
      stores: Stores { catalog, ledger },
      add_to_cart: add_to_cart::build_add_to_cart_pipeline(),
      remove_from_cart: remove_from_cart::build_remove_from_cart_pipeline(),
    };
    debug!(
      add_to_cart_steps = service.add_to_cart.step_names().count(),
      remove_from_cart_steps = service.remove_from_cart.step_names().count(),
      "Cart pipelines built."
    );
    service
  }

  pub fn catalog(&self) -> &Arc<dyn CatalogStore> {
    &self.stores.catalog
  }

  pub fn ledger(&self) -> &Arc<dyn CartLedger> {
    &self.stores.ledger
  }

  pub async fn view_cart(&self, session: &SessionCartList) -> CartResult<CartView> {
    render_cart(session, self.stores.catalog.as_ref(), self.stores.ledger.as_ref()).await
  }

  /// Bumps the item's ledger counter and appends its id to the session list.
  ///
  /// `ItemNotFound` when the catalog has no such item; nothing is mutated in that case.
  #[instrument(name = "cart::add_to_cart", skip(self, session), fields(session_len = session.len()), err(Display))]
  pub async fn add_to_cart(&self, session: &SessionCartList, item_id: ItemId) -> CartResult<CartUpdate> {
    let ctx_data = ContextData::new(AddToCartCtxData::new(self.stores.clone(), session.clone(), item_id));
    self.add_to_cart.run(ctx_data.clone()).await?;

    let guard = ctx_data.read();
    info!(item_id, session_len = guard.session.len(), "Item added to cart.");
    Ok(CartUpdate {
      session: guard.session.clone(),
      notice: Notice::item_added(),
      ledger_entry: guard.ledger_entry,
    })
  }

  /// Removes one occurrence of the id from the session list and takes one off its ledger
  /// counter. An id missing from the list changes nothing and yields the
  /// "item not found in cart" notice.
  #[instrument(name = "cart::remove_from_cart", skip(self, session), fields(session_len = session.len()), err(Display))]
  pub async fn remove_from_cart(&self, session: &SessionCartList, item_id: ItemId) -> CartResult<CartUpdate> {
    let ctx_data = ContextData::new(RemoveFromCartCtxData::new(self.stores.clone(), session.clone(), item_id));
    let outcome = self.remove_from_cart.run(ctx_data.clone()).await?;

    let guard = ctx_data.read();
    let notice = if outcome.is_completed() && guard.removed_from_session {
      Notice::item_removed()
    } else {
      Notice::item_not_in_cart()
    };
    Ok(CartUpdate {
      session: guard.session.clone(),
      notice,
      ledger_entry: guard.ledger_entry,
    })
  }

  /// Cart page "+" control. Leaves the session list alone.
  #[instrument(name = "cart::increase_quantity", skip(self), err(Display))]
  pub async fn increase_quantity(&self, item_id: ItemId) -> CartResult<LedgerEntry> {
    self.stores.ledger.increase(item_id).await
  }

  /// Cart page "-" control. Leaves the session list alone, so a row deleted here simply
  /// stops rendering. A missing row is not an error.
  #[instrument(name = "cart::decrease_quantity", skip(self), err(Display))]
  pub async fn decrease_quantity(&self, item_id: ItemId) -> CartResult<Option<QuantityChange>> {
    match self.stores.ledger.decrease(item_id).await {
      Ok(change) => Ok(Some(change)),
      Err(CartError::LedgerEntryNotFound { .. }) => {
        debug!(item_id, "Decrease requested for an item with no ledger row.");
        Ok(None)
      }
      Err(e) => Err(e),
    }
  }

  /// Zeroes every ledger counter. Rows are kept.
  #[instrument(name = "cart::reset_quantities", skip(self), err(Display))]
  pub async fn reset_quantities(&self) -> CartResult<u64> {
    let rows = self.stores.ledger.reset_all().await?;
    info!(rows, "Cart ledger quantities reset.");
    Ok(rows)
  }
}
