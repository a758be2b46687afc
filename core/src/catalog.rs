// shopcart/src/catalog.rs

//! The catalog store: sellable items and the admin operations on them.

use async_trait::async_trait;

use crate::error::CartResult;
use crate::model::{Item, ItemId, NewItem};

/// Persisted collection of sellable items.
///
/// Implementations surface store failures as [`CartError::Persistence`](crate::CartError::Persistence).
/// Deleting an item never touches the cart ledger; orphaned ledger rows are tolerated by
/// rendering, which skips ids the catalog no longer knows.
#[async_trait]
pub trait CatalogStore: Send + Sync {
  async fn find(&self, id: ItemId) -> CartResult<Option<Item>>;

  /// All items, cheapest first. Ties keep id order.
  async fn list_by_price(&self) -> CartResult<Vec<Item>>;

  /// All items in id order, for the admin page.
  async fn list_all(&self) -> CartResult<Vec<Item>>;

  /// Inserts an active item. Must call [`NewItem::validate`] first and fail with
  /// `Validation` on blank fields.
  async fn create(&self, new_item: NewItem) -> CartResult<Item>;

  /// Deletes one item; `ItemNotFound` when there is no such row.
  async fn delete(&self, id: ItemId) -> CartResult<()>;

  /// Deletes every item and returns how many rows went away.
  async fn delete_all(&self) -> CartResult<u64>;

  /// Sets the active flag; `ItemNotFound` when there is no such row.
  async fn set_active(&self, id: ItemId, active: bool) -> CartResult<Item>;
}
