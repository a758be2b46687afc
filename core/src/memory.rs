// shopcart/src/memory.rs

//! In-memory catalog and ledger, for tests, benchmarks and demos.
//!
//! Both can be switched into a failing mode where every write returns
//! `CartError::Persistence`, to exercise the partial-failure paths.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::catalog::CatalogStore;
use crate::error::{CartError, CartResult};
use crate::ledger::{decrease_transition, CartLedger, QuantityChange};
use crate::model::{Item, ItemId, LedgerEntry, NewItem};

#[derive(Debug, thiserror::Error)]
#[error("in-memory store is configured to fail writes")]
struct InjectedWriteFailure;

fn check_writable(fail_writes: &AtomicBool) -> CartResult<()> {
  if fail_writes.load(Ordering::SeqCst) {
    return Err(CartError::persistence(InjectedWriteFailure));
  }
  Ok(())
}

#[derive(Debug, Default)]
struct CatalogRows {
  next_id: ItemId,
  items: BTreeMap<ItemId, Item>,
}

#[derive(Debug, Default)]
pub struct InMemoryCatalog {
  rows: RwLock<CatalogRows>,
  fail_writes: AtomicBool,
}

impl InMemoryCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Catalog pre-filled with `(title, price)` items; ids are assigned from 1 in order.
  pub fn with_items(items: &[(&str, i64)]) -> Self {
    let catalog = Self::new();
    {
      let mut rows = catalog.rows.write();
      for (title, price) in items {
        rows.next_id += 1;
        let id = rows.next_id;
        rows.items.insert(
          id,
          Item {
            id,
            title: (*title).to_string(),
            price: *price,
            is_active: true,
            description: format!("{} description", title),
            image: format!("{}.png", title.to_lowercase()),
          },
        );
      }
    }
    catalog
  }

  /// Places an item under a fixed id, replacing whatever was there.
  pub fn insert_with_id(&self, item: Item) {
    let mut rows = self.rows.write();
    rows.next_id = rows.next_id.max(item.id);
    rows.items.insert(item.id, item);
  }

  pub fn set_fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }

  pub fn len(&self) -> usize {
    self.rows.read().items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
  async fn find(&self, id: ItemId) -> CartResult<Option<Item>> {
    Ok(self.rows.read().items.get(&id).cloned())
  }

  async fn list_by_price(&self) -> CartResult<Vec<Item>> {
    let mut items: Vec<Item> = self.rows.read().items.values().cloned().collect();
    // Stable sort keeps id order among equal prices.
    items.sort_by_key(|item| item.price);
    Ok(items)
  }

  async fn list_all(&self) -> CartResult<Vec<Item>> {
    Ok(self.rows.read().items.values().cloned().collect())
  }

  async fn create(&self, new_item: NewItem) -> CartResult<Item> {
    new_item.validate()?;
    check_writable(&self.fail_writes)?;
    let mut rows = self.rows.write();
    rows.next_id += 1;
    let item = Item {
      id: rows.next_id,
      title: new_item.title,
      price: new_item.price,
      is_active: true,
      description: new_item.description,
      image: new_item.image,
    };
    rows.items.insert(item.id, item.clone());
    Ok(item)
  }

  async fn delete(&self, id: ItemId) -> CartResult<()> {
    check_writable(&self.fail_writes)?;
    match self.rows.write().items.remove(&id) {
      Some(_) => Ok(()),
      None => Err(CartError::ItemNotFound { item_id: id }),
    }
  }

  async fn delete_all(&self) -> CartResult<u64> {
    check_writable(&self.fail_writes)?;
    let mut rows = self.rows.write();
    let removed = rows.items.len() as u64;
    rows.items.clear();
    Ok(removed)
  }

  async fn set_active(&self, id: ItemId, active: bool) -> CartResult<Item> {
    check_writable(&self.fail_writes)?;
    let mut rows = self.rows.write();
    let item = rows
      .items
      .get_mut(&id)
      .ok_or(CartError::ItemNotFound { item_id: id })?;
    item.is_active = active;
    Ok(item.clone())
  }
}

#[derive(Debug, Default)]
struct LedgerRows {
  next_id: i64,
  // Kept in insertion (= id) order, like a table scanned without ORDER BY.
  entries: Vec<LedgerEntry>,
}

impl LedgerRows {
  fn first_mut(&mut self, item_id: ItemId) -> Option<&mut LedgerEntry> {
    self.entries.iter_mut().find(|e| e.item_id == item_id)
  }
}

#[derive(Debug, Default)]
pub struct InMemoryLedger {
  rows: Mutex<LedgerRows>,
  fail_writes: AtomicBool,
}

impl InMemoryLedger {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set_fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }

  /// Current quantity for `item_id`, `None` when there is no row.
  pub fn quantity(&self, item_id: ItemId) -> Option<i64> {
    self
      .rows
      .lock()
      .entries
      .iter()
      .find(|e| e.item_id == item_id)
      .map(|e| e.quantity)
  }

  pub fn row_count(&self) -> usize {
    self.rows.lock().entries.len()
  }
}

#[async_trait]
impl CartLedger for InMemoryLedger {
  async fn entry(&self, item_id: ItemId) -> CartResult<Option<LedgerEntry>> {
    Ok(self.rows.lock().entries.iter().find(|e| e.item_id == item_id).copied())
  }

  async fn entries(&self) -> CartResult<Vec<LedgerEntry>> {
    Ok(self.rows.lock().entries.clone())
  }

  async fn increase(&self, item_id: ItemId) -> CartResult<LedgerEntry> {
    check_writable(&self.fail_writes)?;
    let mut rows = self.rows.lock();
    if let Some(entry) = rows.first_mut(item_id) {
      entry.quantity += 1;
      return Ok(*entry);
    }
    rows.next_id += 1;
    let entry = LedgerEntry {
      id: rows.next_id,
      item_id,
      quantity: 1,
    };
    rows.entries.push(entry);
    Ok(entry)
  }

  async fn decrease(&self, item_id: ItemId) -> CartResult<QuantityChange> {
    check_writable(&self.fail_writes)?;
    let mut rows = self.rows.lock();
    let entry = *rows
      .first_mut(item_id)
      .ok_or(CartError::LedgerEntryNotFound { item_id })?;

    let change = decrease_transition(entry);
    match change {
      QuantityChange::Decremented(updated) => {
        if let Some(row) = rows.first_mut(item_id) {
          *row = updated;
        }
      }
      QuantityChange::Removed { .. } => rows.entries.retain(|e| e.id != entry.id),
      QuantityChange::Unchanged(_) => {}
    }
    Ok(change)
  }

  async fn decrement(&self, item_id: ItemId) -> CartResult<LedgerEntry> {
    check_writable(&self.fail_writes)?;
    let mut rows = self.rows.lock();
    let entry = rows
      .first_mut(item_id)
      .ok_or(CartError::LedgerEntryNotFound { item_id })?;
    entry.quantity -= 1;
    Ok(*entry)
  }

  async fn reset_all(&self) -> CartResult<u64> {
    check_writable(&self.fail_writes)?;
    let mut rows = self.rows.lock();
    for entry in rows.entries.iter_mut() {
      entry.quantity = 0;
    }
    Ok(rows.entries.len() as u64)
  }
}
