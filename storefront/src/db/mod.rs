// storefront/src/db/mod.rs

//! SQLite pool setup, schema bootstrap, demo seed, and the store implementations.

pub mod catalog;
pub mod ledger;

pub use catalog::SqliteCatalog;
pub use ledger::SqliteLedger;

use crate::errors::Result as AppResult;
use shopcart::{CatalogStore, NewItem};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{info, instrument};

/// Opens the pool for `database_url`, creating the database file if needed.
///
/// `sqlite::memory:` gets a single connection that never expires, since every new
/// connection would otherwise see its own empty database.
#[instrument(name = "db::connect", err(Display))]
pub async fn connect(database_url: &str) -> AppResult<SqlitePool> {
  let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

  let pool = if database_url.contains(":memory:") {
    SqlitePoolOptions::new()
      .max_connections(1)
      .idle_timeout(None)
      .max_lifetime(None)
      .connect_with(options)
      .await?
  } else {
    SqlitePoolOptions::new().max_connections(5).connect_with(options).await?
  };

  info!("Connected to the database.");
  Ok(pool)
}

/// Creates the `item` and `cart` tables when missing. `cart.item_id` is deliberately not a
/// foreign key: deleting an item leaves its ledger row behind.
pub async fn bootstrap_schema(pool: &SqlitePool) -> AppResult<()> {
  sqlx::query(
    r#"
    CREATE TABLE IF NOT EXISTS item (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      title TEXT NOT NULL,
      price INTEGER NOT NULL,
      is_active BOOLEAN NOT NULL DEFAULT 1,
      description TEXT NOT NULL,
      image TEXT NOT NULL
    )
    "#,
  )
  .execute(pool)
  .await?;

  sqlx::query(
    r#"
    CREATE TABLE IF NOT EXISTS cart (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      item_id INTEGER NOT NULL,
      quantity INTEGER NOT NULL DEFAULT 1
    )
    "#,
  )
  .execute(pool)
  .await?;

  info!("Database schema ready.");
  Ok(())
}

/// Inserts demo items, but only into an empty catalog.
pub async fn seed_demo_items(catalog: &dyn CatalogStore) -> AppResult<usize> {
  if !catalog.list_all().await?.is_empty() {
    info!("Catalog already has items; skipping seed.");
    return Ok(0);
  }

  let demo = [
    ("Ceramic mug", 450, "Glazed stoneware mug, 350 ml.", "mug.jpg"),
    ("Linen tea towel", 900, "Stonewashed linen, 50 x 70 cm.", "towel.jpg"),
    ("Oak serving board", 2400, "Oiled oak, hand-finished edges.", "board.jpg"),
  ];
  for (title, price, description, image) in demo {
    catalog
      .create(NewItem {
        title: title.to_string(),
        price,
        description: description.to_string(),
        image: image.to_string(),
      })
      .await?;
  }

  info!(count = demo.len(), "Seeded demo items.");
  Ok(demo.len())
}
