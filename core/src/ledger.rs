// shopcart/src/ledger.rs

//! The cart ledger: global per-item quantity counters and their transitions.

use async_trait::async_trait;
use tracing::{event, instrument, Level};

use crate::catalog::CatalogStore;
use crate::error::{CartError, CartResult};
use crate::model::{ItemId, LedgerEntry};

/// What a [`CartLedger::decrease`] did to the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
  /// Quantity went down by one and the row is still there.
  Decremented(LedgerEntry),
  /// The row held quantity 1 and has been deleted.
  Removed { item_id: ItemId },
  /// The row held 0 or less (after a reset or the remove path) and was left alone.
  Unchanged(LedgerEntry),
}

/// Persisted `item id -> quantity` counters.
///
/// There is one row per item id, shared by every session; the store enforces this with
/// lookup-before-insert, not a uniqueness constraint. Each mutating call commits on its own.
///
/// The three ways down are deliberately different:
///  - [`decrease`](CartLedger::decrease) deletes the row instead of storing 0,
///  - [`decrement`](CartLedger::decrement) subtracts one and never deletes,
///  - [`reset_all`](CartLedger::reset_all) stores 0 everywhere and never deletes.
#[async_trait]
pub trait CartLedger: Send + Sync {
  /// The first entry for `item_id`, if any.
  async fn entry(&self, item_id: ItemId) -> CartResult<Option<LedgerEntry>>;

  /// Every row in id order.
  async fn entries(&self) -> CartResult<Vec<LedgerEntry>>;

  /// Creates the row with quantity 1, or adds one to it.
  async fn increase(&self, item_id: ItemId) -> CartResult<LedgerEntry>;

  /// Takes one off; a row at 1 is deleted. `LedgerEntryNotFound` when there is no row.
  async fn decrease(&self, item_id: ItemId) -> CartResult<QuantityChange>;

  /// Raw `quantity - 1` with no delete at zero. `LedgerEntryNotFound` when there is no row.
  async fn decrement(&self, item_id: ItemId) -> CartResult<LedgerEntry>;

  /// Sets every quantity to 0 without deleting rows. Returns the number of rows touched.
  async fn reset_all(&self) -> CartResult<u64>;

  async fn require_entry(&self, item_id: ItemId) -> CartResult<LedgerEntry> {
    self
      .entry(item_id)
      .await?
      .ok_or(CartError::LedgerEntryNotFound { item_id })
  }
}

/// The next state of a row under [`CartLedger::decrease`]. Store implementations apply it.
pub fn decrease_transition(entry: LedgerEntry) -> QuantityChange {
  match entry.quantity {
    q if q > 1 => QuantityChange::Decremented(LedgerEntry {
      quantity: q - 1,
      ..entry
    }),
    1 => QuantityChange::Removed { item_id: entry.item_id },
    _ => QuantityChange::Unchanged(entry),
  }
}

/// Quantity times the item's current catalog price.
#[instrument(name = "ledger::total_price", skip(catalog), fields(item_id = entry.item_id, quantity = entry.quantity), err(Display))]
pub async fn total_price(catalog: &dyn CatalogStore, entry: &LedgerEntry) -> CartResult<i64> {
  let item = catalog.find(entry.item_id).await?.ok_or_else(|| {
    event!(Level::WARN, "Ledger row refers to an item the catalog no longer has.");
    CartError::ItemNotFound { item_id: entry.item_id }
  })?;
  item
    .price
    .checked_mul(entry.quantity)
    .ok_or(CartError::AmountOverflow { item_id: entry.item_id })
}
