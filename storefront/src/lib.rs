// storefront/src/lib.rs

//! The storefront HTTP server: SQLite-backed catalog and cart ledger, the session cart
//! list in an encrypted cookie, JSON handlers over [`shopcart::CartService`].

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod session;
pub mod state;
pub mod web;

use std::sync::Arc;

use shopcart::CartService;
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::db::{SqliteCatalog, SqliteLedger};
use crate::errors::Result as AppResult;
use crate::state::AppState;

/// Prepares the schema, optionally seeds, and wires the SQLite stores into an [`AppState`].
pub async fn build_app_state(config: &AppConfig, db_pool: SqlitePool) -> AppResult<AppState> {
  db::bootstrap_schema(&db_pool).await?;

  let catalog = Arc::new(SqliteCatalog::new(db_pool.clone()));
  let ledger = Arc::new(SqliteLedger::new(db_pool.clone()));

  if config.seed_db {
    db::seed_demo_items(&*catalog).await?;
  }

  let session_key = config.session_key();
  Ok(AppState {
    db_pool,
    cart: Arc::new(CartService::new(catalog, ledger)),
    session_key,
  })
}
