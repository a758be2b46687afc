// shopcart/src/cart/remove_from_cart.rs

use tracing::{debug, info};

use crate::cart::contexts::RemoveFromCartCtxData;
use crate::core::{ContextData, PipelineControl};
use crate::error::CartError;
use crate::pipeline::Pipeline;

pub const PIPELINE_NAME: &str = "remove_from_cart";

/// remove_session_occurrence -> decrement_ledger_quantity
///
/// Unlike the cart page's decrease control, the ledger side here is a raw decrement:
/// a row at 1 drops to 0 and stays.
pub fn build_remove_from_cart_pipeline() -> Pipeline<RemoveFromCartCtxData> {
  let mut p = Pipeline::<RemoveFromCartCtxData>::new(
    PIPELINE_NAME,
    &["remove_session_occurrence", "decrement_ledger_quantity"],
  );

  p.on_step("remove_session_occurrence", |ctx_data: ContextData<RemoveFromCartCtxData>| {
    Box::pin(async move {
      let mut guard = ctx_data.write();
      let item_id = guard.item_id;
      // One occurrence only; duplicates keep the item in the rendered cart.
      guard.removed_from_session = guard.session.remove_one(item_id);
      if guard.removed_from_session {
        Ok::<_, CartError>(PipelineControl::Continue)
      } else {
        info!(item_id, "Remove from cart: id is not in the session list.");
        Ok(PipelineControl::Stop)
      }
    })
  });

  p.on_step("decrement_ledger_quantity", |ctx_data: ContextData<RemoveFromCartCtxData>| {
    Box::pin(async move {
      let (item_id, stores) = {
        let guard = ctx_data.read();
        (guard.item_id, guard.stores.clone())
      };

      if stores.catalog.find(item_id).await?.is_none() {
        debug!(item_id, "Remove from cart: item left the catalog; ledger untouched.");
        return Ok::<_, CartError>(PipelineControl::Continue);
      }

      match stores.ledger.decrement(item_id).await {
        Ok(entry) => {
          info!(item_id, quantity = entry.quantity, "Remove from cart: ledger quantity decremented.");
          ctx_data.write().ledger_entry = Some(entry);
          Ok(PipelineControl::Continue)
        }
        Err(CartError::LedgerEntryNotFound { .. }) => {
          debug!(item_id, "Remove from cart: no ledger row to decrement.");
          Ok(PipelineControl::Continue)
        }
        Err(e) => Err(e),
      }
    })
  });

  p
}
