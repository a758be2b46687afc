// tests/ledger_tests.rs
mod common;

use common::*;
use shopcart::{total_price, CartError, CartLedger, InMemoryCatalog, InMemoryLedger, LedgerEntry, QuantityChange};

#[tokio::test]
async fn test_increase_creates_then_increments_single_row() {
  setup_tracing();
  let ledger = InMemoryLedger::new();

  let first = ledger.increase(9).await.unwrap();
  assert_eq!(first.quantity, 1);
  let second = ledger.increase(9).await.unwrap();
  assert_eq!(second.quantity, 2);
  assert_eq!(second.id, first.id);
  assert_eq!(ledger.row_count(), 1);
}

#[tokio::test]
async fn test_decrease_after_increases_leaves_count_minus_one() {
  setup_tracing();
  for increases in 2..=5_i64 {
    let ledger = InMemoryLedger::new();
    for _ in 0..increases {
      ledger.increase(3).await.unwrap();
    }
    let change = ledger.decrease(3).await.unwrap();
    assert!(matches!(change, QuantityChange::Decremented(LedgerEntry { quantity, .. }) if quantity == increases - 1));
    assert_eq!(ledger.quantity(3), Some(increases - 1));
  }
}

#[tokio::test]
async fn test_decrease_from_one_deletes_the_row() {
  setup_tracing();
  let ledger = InMemoryLedger::new();
  ledger.increase(3).await.unwrap();

  let change = ledger.decrease(3).await.unwrap();

  assert_eq!(change, QuantityChange::Removed { item_id: 3 });
  assert_eq!(ledger.quantity(3), None);
  assert!(ledger.entry(3).await.unwrap().is_none());
}

#[tokio::test]
async fn test_decrease_without_row_reports_missing_entry() {
  setup_tracing();
  let ledger = InMemoryLedger::new();
  let err = ledger.decrease(11).await.unwrap_err();
  assert!(matches!(err, CartError::LedgerEntryNotFound { item_id: 11 }));
  assert_eq!(ledger.row_count(), 0);
}

#[tokio::test]
async fn test_reset_all_keeps_rows_at_zero() {
  setup_tracing();
  let ledger = InMemoryLedger::new();
  ledger.increase(1).await.unwrap();
  ledger.increase(1).await.unwrap();
  ledger.increase(2).await.unwrap();

  let touched = ledger.reset_all().await.unwrap();

  assert_eq!(touched, 2);
  let entries = ledger.entries().await.unwrap();
  assert_eq!(entries.len(), 2);
  assert!(entries.iter().all(|e| e.quantity == 0));
}

#[tokio::test]
async fn test_decrease_on_zeroed_row_is_left_alone() {
  setup_tracing();
  let ledger = InMemoryLedger::new();
  ledger.increase(4).await.unwrap();
  ledger.reset_all().await.unwrap();

  let change = ledger.decrease(4).await.unwrap();

  assert!(matches!(change, QuantityChange::Unchanged(LedgerEntry { quantity: 0, .. })));
  assert_eq!(ledger.quantity(4), Some(0));
}

#[tokio::test]
async fn test_raw_decrement_reaches_zero_and_keeps_row() {
  setup_tracing();
  let ledger = InMemoryLedger::new();
  ledger.increase(6).await.unwrap();

  let entry = ledger.decrement(6).await.unwrap();

  assert_eq!(entry.quantity, 0);
  assert_eq!(ledger.row_count(), 1);
  assert_eq!(ledger.require_entry(6).await.unwrap(), entry);
  assert!(matches!(
    ledger.decrement(60).await.unwrap_err(),
    CartError::LedgerEntryNotFound { item_id: 60 }
  ));
}

#[tokio::test]
async fn test_total_price_uses_current_catalog_price() {
  setup_tracing();
  let catalog = InMemoryCatalog::with_items(&[("Mug", 150)]);
  let ledger = InMemoryLedger::new();
  ledger.increase(1).await.unwrap();
  let entry = ledger.increase(1).await.unwrap();

  assert_eq!(total_price(&catalog, &entry).await.unwrap(), 300);

  catalog.insert_with_id(item(1, "Mug", 175));
  assert_eq!(total_price(&catalog, &entry).await.unwrap(), 350);
}

#[tokio::test]
async fn test_total_price_for_deleted_item_is_item_not_found() {
  setup_tracing();
  let catalog = InMemoryCatalog::new();
  let entry = LedgerEntry { id: 1, item_id: 77, quantity: 2 };

  let err = total_price(&catalog, &entry).await.unwrap_err();

  assert!(matches!(err, CartError::ItemNotFound { item_id: 77 }));
}

#[tokio::test]
async fn test_total_price_overflow_is_an_error() {
  setup_tracing();
  let catalog = InMemoryCatalog::new();
  catalog.insert_with_id(item(3, "Yacht", i64::MAX / 2 + 1));
  let entry = LedgerEntry { id: 1, item_id: 3, quantity: 2 };

  let err = total_price(&catalog, &entry).await.unwrap_err();

  assert!(matches!(err, CartError::AmountOverflow { item_id: 3 }));
}

#[tokio::test]
async fn test_failing_store_reports_persistence_failure() {
  setup_tracing();
  let ledger = InMemoryLedger::new();
  ledger.set_fail_writes(true);

  let err = ledger.increase(1).await.unwrap_err();

  assert!(matches!(err, CartError::Persistence { .. }));
  assert_eq!(ledger.row_count(), 0);
}
