// storefront/src/state.rs
use actix_web::cookie::Key;
use shopcart::{CartService, CatalogStore};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub db_pool: SqlitePool,
  pub cart: Arc<CartService>,
  pub session_key: Key,
}

impl AppState {
  pub fn catalog(&self) -> &Arc<dyn CatalogStore> {
    self.cart.catalog()
  }
}
