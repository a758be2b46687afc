// storefront/src/db/ledger.rs

use async_trait::async_trait;
use shopcart::ledger::decrease_transition;
use shopcart::{CartError, CartLedger, CartResult, ItemId, LedgerEntry, QuantityChange};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, instrument};

use crate::models::LedgerRow;

/// `CartLedger` over the `cart` table.
///
/// Each mutating call runs in its own transaction: look up the first row for the item,
/// then insert/update/delete, then commit. Dropping the transaction on an error path rolls
/// it back. Uniqueness per item id rests on that lookup; the table has no constraint.
#[derive(Debug, Clone)]
pub struct SqliteLedger {
  pool: SqlitePool,
}

impl SqliteLedger {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  async fn begin(&self) -> CartResult<Transaction<'static, Sqlite>> {
    self.pool.begin().await.map_err(CartError::persistence)
  }
}

async fn first_row(tx: &mut Transaction<'static, Sqlite>, item_id: ItemId) -> CartResult<Option<LedgerRow>> {
  sqlx::query_as("SELECT id, item_id, quantity FROM cart WHERE item_id = ? ORDER BY id LIMIT 1")
    .bind(item_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(CartError::persistence)
}

async fn commit(tx: Transaction<'static, Sqlite>) -> CartResult<()> {
  tx.commit().await.map_err(CartError::persistence)
}

#[async_trait]
impl CartLedger for SqliteLedger {
  async fn entry(&self, item_id: ItemId) -> CartResult<Option<LedgerEntry>> {
    let row: Option<LedgerRow> =
      sqlx::query_as("SELECT id, item_id, quantity FROM cart WHERE item_id = ? ORDER BY id LIMIT 1")
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(CartError::persistence)?;
    Ok(row.map(LedgerEntry::from))
  }

  async fn entries(&self) -> CartResult<Vec<LedgerEntry>> {
    let rows: Vec<LedgerRow> = sqlx::query_as("SELECT id, item_id, quantity FROM cart ORDER BY id")
      .fetch_all(&self.pool)
      .await
      .map_err(CartError::persistence)?;
    Ok(rows.into_iter().map(LedgerEntry::from).collect())
  }

  #[instrument(name = "SqliteLedger::increase", skip(self), err(Display))]
  async fn increase(&self, item_id: ItemId) -> CartResult<LedgerEntry> {
    let mut tx = self.begin().await?;
    let row: LedgerRow = match first_row(&mut tx, item_id).await? {
      Some(existing) => sqlx::query_as("UPDATE cart SET quantity = quantity + 1 WHERE id = ? RETURNING id, item_id, quantity")
        .bind(existing.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(CartError::persistence)?,
      None => sqlx::query_as("INSERT INTO cart (item_id, quantity) VALUES (?, 1) RETURNING id, item_id, quantity")
        .bind(item_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(CartError::persistence)?,
    };
    commit(tx).await?;
    debug!(quantity = row.quantity, "Ledger quantity increased.");
    Ok(row.into())
  }

  #[instrument(name = "SqliteLedger::decrease", skip(self), err(Display))]
  async fn decrease(&self, item_id: ItemId) -> CartResult<QuantityChange> {
    let mut tx = self.begin().await?;
    let existing: LedgerEntry = first_row(&mut tx, item_id)
      .await?
      .ok_or(CartError::LedgerEntryNotFound { item_id })?
      .into();

    let change = decrease_transition(existing);
    match change {
      QuantityChange::Decremented(updated) => {
        sqlx::query("UPDATE cart SET quantity = ? WHERE id = ?")
          .bind(updated.quantity)
          .bind(updated.id)
          .execute(&mut *tx)
          .await
          .map_err(CartError::persistence)?;
      }
      QuantityChange::Removed { .. } => {
        sqlx::query("DELETE FROM cart WHERE id = ?")
          .bind(existing.id)
          .execute(&mut *tx)
          .await
          .map_err(CartError::persistence)?;
      }
      QuantityChange::Unchanged(_) => {}
    }
    commit(tx).await?;
    debug!(?change, "Ledger quantity decreased.");
    Ok(change)
  }

  #[instrument(name = "SqliteLedger::decrement", skip(self), err(Display))]
  async fn decrement(&self, item_id: ItemId) -> CartResult<LedgerEntry> {
    let mut tx = self.begin().await?;
    let existing = first_row(&mut tx, item_id)
      .await?
      .ok_or(CartError::LedgerEntryNotFound { item_id })?;
    let row: LedgerRow =
      sqlx::query_as("UPDATE cart SET quantity = quantity - 1 WHERE id = ? RETURNING id, item_id, quantity")
        .bind(existing.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(CartError::persistence)?;
    commit(tx).await?;
    Ok(row.into())
  }

  #[instrument(name = "SqliteLedger::reset_all", skip(self), err(Display))]
  async fn reset_all(&self) -> CartResult<u64> {
    let result = sqlx::query("UPDATE cart SET quantity = 0")
      .execute(&self.pool)
      .await
      .map_err(CartError::persistence)?;
    Ok(result.rows_affected())
  }
}
