// storefront/src/models/mod.rs

//! Row structs for the two SQLite tables. They convert into the `shopcart` models.

pub mod item;
pub mod ledger_entry;

pub use item::ItemRow;
pub use ledger_entry::LedgerRow;
