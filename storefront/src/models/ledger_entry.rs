// storefront/src/models/ledger_entry.rs

use shopcart::LedgerEntry;
use sqlx::FromRow;

/// A row of the `cart` table.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct LedgerRow {
  pub id: i64,
  pub item_id: i64,
  pub quantity: i64,
}

impl From<LedgerRow> for LedgerEntry {
  fn from(row: LedgerRow) -> Self {
    LedgerEntry {
      id: row.id,
      item_id: row.item_id,
      quantity: row.quantity,
    }
  }
}
