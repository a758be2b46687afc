// shopcart/src/reconcile.rs

//! Deriving the renderable cart from the session list and the ledger.

use tracing::{debug, instrument};

use crate::catalog::CatalogStore;
use crate::error::{CartError, CartResult};
use crate::ledger::CartLedger;
use crate::model::{CartLine, CartView};
use crate::session::SessionCartList;

/// Builds the cart view for one session.
///
/// Walks the session's distinct ids in first-occurrence order. An id is skipped, without
/// error, when the catalog has no such item or the ledger has no row for it (for instance
/// after a decrease deleted the row); the id itself stays in the session list. Rows left
/// at quantity 0 by a reset still render and add nothing to the total.
#[instrument(name = "reconcile::render_cart", skip_all, fields(session_len = session.len()), err(Display))]
pub async fn render_cart(
  session: &SessionCartList,
  catalog: &dyn CatalogStore,
  ledger: &dyn CartLedger,
) -> CartResult<CartView> {
  let mut lines = Vec::new();

  for item_id in session.distinct_ids() {
    let Some(item) = catalog.find(item_id).await? else {
      debug!(item_id, "Session id has no catalog item; skipping.");
      continue;
    };
    let Some(entry) = ledger.entry(item_id).await? else {
      debug!(item_id, "Session id has no ledger row; skipping.");
      continue;
    };
    lines.push(CartLine {
      id: item.id,
      title: item.title,
      price: item.price,
      quantity: entry.quantity,
      image: item.image,
    });
  }

  let mut total: i64 = 0;
  for line in &lines {
    total = total
      .checked_add(line.subtotal()?)
      .ok_or(CartError::AmountOverflow { item_id: line.id })?;
  }
  debug!(lines = lines.len(), total, "Cart rendered.");
  Ok(CartView { lines, total })
}
