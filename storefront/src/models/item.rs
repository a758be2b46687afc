// storefront/src/models/item.rs

use serde::Deserialize;
use shopcart::{Item, NewItem};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ItemRow {
  pub id: i64,
  pub title: String,
  pub price: i64,
  pub is_active: bool,
  pub description: String,
  pub image: String,
}

impl From<ItemRow> for Item {
  fn from(row: ItemRow) -> Self {
    Item {
      id: row.id,
      title: row.title,
      price: row.price,
      is_active: row.is_active,
      description: row.description,
      image: row.image,
    }
  }
}

/// Body of `POST /create`.
#[derive(Debug, Deserialize)]
pub struct CreateItemPayload {
  pub title: String,
  pub price: i64,
  pub description: String,
  pub image: String,
}

impl From<CreateItemPayload> for NewItem {
  fn from(payload: CreateItemPayload) -> Self {
    NewItem {
      title: payload.title,
      price: payload.price,
      description: payload.description,
      image: payload.image,
    }
  }
}
