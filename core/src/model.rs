// shopcart/src/model.rs

//! Plain data carried between the stores, the transitions and the HTTP edge.

use serde::{Deserialize, Serialize};

use crate::error::{CartError, CartResult};

/// Identity of a catalog item. Ledger rows and session lists refer to items by this id.
pub type ItemId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  pub id: ItemId,
  pub title: String,
  // Unit is whatever the shop owner types in; nothing enforces non-negative.
  pub price: i64,
  pub is_active: bool,
  pub description: String,
  pub image: String,
}

/// Fields an admin supplies when creating an item. New items start active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
  pub title: String,
  pub price: i64,
  pub description: String,
  pub image: String,
}

impl NewItem {
  /// Rejects blank text fields; every catalog column except `is_active` is required.
  pub fn validate(&self) -> CartResult<()> {
    let blank = [
      ("title", &self.title),
      ("description", &self.description),
      ("image", &self.image),
    ]
    .into_iter()
    .find(|(_, value)| value.trim().is_empty());

    match blank {
      Some((field, _)) => Err(CartError::Validation(format!("Item {} cannot be empty.", field))),
      None => Ok(()),
    }
  }
}

/// One row of the cart ledger. `quantity` is normally >= 1; reset and the remove path
/// can leave it at 0 (or lower) without deleting the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
  pub id: i64,
  pub item_id: ItemId,
  pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
  pub id: ItemId,
  pub title: String,
  pub price: i64,
  pub quantity: i64,
  pub image: String,
}

impl CartLine {
  /// `price * quantity`; `AmountOverflow` when it does not fit in an `i64`.
  pub fn subtotal(&self) -> CartResult<i64> {
    self
      .price
      .checked_mul(self.quantity)
      .ok_or(CartError::AmountOverflow { item_id: self.id })
  }
}

/// The rendered cart: lines in first-touched order plus the grand total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartView {
  pub lines: Vec<CartLine>,
  pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
  Success,
  Error,
}

/// Short message shown to the shopper after a cart or admin action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
  pub kind: NoticeKind,
  pub message: &'static str,
}

impl Notice {
  pub fn item_added() -> Self {
    Self { kind: NoticeKind::Success, message: "item added" }
  }

  pub fn item_not_found() -> Self {
    Self { kind: NoticeKind::Error, message: "item not found in catalog" }
  }

  pub fn item_removed() -> Self {
    Self { kind: NoticeKind::Success, message: "item removed" }
  }

  pub fn item_not_in_cart() -> Self {
    Self { kind: NoticeKind::Error, message: "item not found in cart" }
  }

  pub fn item_deleted() -> Self {
    Self { kind: NoticeKind::Success, message: "item deleted" }
  }

  pub fn is_success(&self) -> bool {
    self.kind == NoticeKind::Success
  }
}
