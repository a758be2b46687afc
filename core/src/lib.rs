// shopcart/src/lib.rs

//! Shopcart: the cart bookkeeping behind a small storefront.
//!
//! Two stores hold the state:
//!  - the [`CatalogStore`], the sellable items,
//!  - the [`CartLedger`], one global `item id -> quantity` counter per item ever added.
//!
//! A third piece of state, the [`SessionCartList`], lives with the browser session and
//! records which item ids the session has touched (duplicates included). It is passed into
//! every transition as a value and handed back in the outcome.
//!
//! The ledger is keyed by item id only, so all sessions share one counter per item.
//! That is how the storefront has always behaved and it is kept that way here.
//!
//! The multi-step transitions (add to cart, remove from cart) are [`Pipeline`]s: named
//! steps run in order over a shared [`ContextData`], each able to continue, halt or fail.

pub mod cart;
pub mod catalog;
pub mod core;
pub mod error;
pub mod ledger;
pub mod memory;
pub mod model;
pub mod pipeline;
pub mod reconcile;
pub mod session;

// --- Re-exports for the Public API ---

pub use crate::core::context_data::ContextData;
pub use crate::core::control::{PipelineControl, PipelineResult};
pub use crate::pipeline::{Handler, Pipeline};

pub use crate::cart::{CartService, CartUpdate};
pub use crate::catalog::CatalogStore;
pub use crate::error::{CartError, CartResult};
pub use crate::ledger::{total_price, CartLedger, QuantityChange};
pub use crate::memory::{InMemoryCatalog, InMemoryLedger};
pub use crate::model::{CartLine, CartView, Item, ItemId, LedgerEntry, NewItem, Notice, NoticeKind};
pub use crate::reconcile::render_cart;
pub use crate::session::{DistinctIds, SessionCartList};
