// storefront/src/db/catalog.rs

use async_trait::async_trait;
use shopcart::{CartError, CartResult, CatalogStore, Item, ItemId, NewItem};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::models::ItemRow;

const ITEM_COLUMNS: &str = "id, title, price, is_active, description, image";

/// `CatalogStore` over the `item` table.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
  pool: SqlitePool,
}

impl SqliteCatalog {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  async fn fetch_items(&self, order_by: &str) -> CartResult<Vec<Item>> {
    let rows: Vec<ItemRow> = sqlx::query_as(&format!("SELECT {} FROM item ORDER BY {}", ITEM_COLUMNS, order_by))
      .fetch_all(&self.pool)
      .await
      .map_err(CartError::persistence)?;
    Ok(rows.into_iter().map(Item::from).collect())
  }
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
  async fn find(&self, id: ItemId) -> CartResult<Option<Item>> {
    let row: Option<ItemRow> = sqlx::query_as(&format!("SELECT {} FROM item WHERE id = ?", ITEM_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(CartError::persistence)?;
    Ok(row.map(Item::from))
  }

  async fn list_by_price(&self) -> CartResult<Vec<Item>> {
    self.fetch_items("price ASC, id ASC").await
  }

  async fn list_all(&self) -> CartResult<Vec<Item>> {
    self.fetch_items("id ASC").await
  }

  #[instrument(name = "SqliteCatalog::create", skip(self, new_item), fields(title = %new_item.title), err(Display))]
  async fn create(&self, new_item: NewItem) -> CartResult<Item> {
    new_item.validate()?;
    let row: ItemRow = sqlx::query_as(&format!(
      "INSERT INTO item (title, price, is_active, description, image) VALUES (?, ?, 1, ?, ?) RETURNING {}",
      ITEM_COLUMNS
    ))
    .bind(&new_item.title)
    .bind(new_item.price)
    .bind(&new_item.description)
    .bind(&new_item.image)
    .fetch_one(&self.pool)
    .await
    .map_err(CartError::persistence)?;
    debug!(item_id = row.id, "Item created.");
    Ok(row.into())
  }

  #[instrument(name = "SqliteCatalog::delete", skip(self), err(Display))]
  async fn delete(&self, id: ItemId) -> CartResult<()> {
    let result = sqlx::query("DELETE FROM item WHERE id = ?")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(CartError::persistence)?;
    if result.rows_affected() == 0 {
      return Err(CartError::ItemNotFound { item_id: id });
    }
    Ok(())
  }

  async fn delete_all(&self) -> CartResult<u64> {
    let result = sqlx::query("DELETE FROM item")
      .execute(&self.pool)
      .await
      .map_err(CartError::persistence)?;
    Ok(result.rows_affected())
  }

  #[instrument(name = "SqliteCatalog::set_active", skip(self), err(Display))]
  async fn set_active(&self, id: ItemId, active: bool) -> CartResult<Item> {
    let row: Option<ItemRow> = sqlx::query_as(&format!(
      "UPDATE item SET is_active = ? WHERE id = ? RETURNING {}",
      ITEM_COLUMNS
    ))
    .bind(active)
    .bind(id)
    .fetch_optional(&self.pool)
    .await
    .map_err(CartError::persistence)?;
    row.map(Item::from).ok_or(CartError::ItemNotFound { item_id: id })
  }
}
