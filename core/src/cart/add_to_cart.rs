// shopcart/src/cart/add_to_cart.rs

use tracing::{info, warn};

use crate::cart::contexts::AddToCartCtxData;
use crate::core::{ContextData, PipelineControl};
use crate::error::CartError;
use crate::pipeline::Pipeline;

pub const PIPELINE_NAME: &str = "add_to_cart";

/// lookup_catalog_item -> increase_ledger_quantity -> append_to_session
///
/// The ledger write and the session append are not atomic: when the ledger write fails
/// the session list is left as it was; once the ledger committed, nothing undoes it.
pub fn build_add_to_cart_pipeline() -> Pipeline<AddToCartCtxData> {
  let mut p = Pipeline::<AddToCartCtxData>::new(
    PIPELINE_NAME,
    &["lookup_catalog_item", "increase_ledger_quantity", "append_to_session"],
  );

  p.on_step("lookup_catalog_item", |ctx_data: ContextData<AddToCartCtxData>| {
    Box::pin(async move {
      let (item_id, catalog) = {
        let guard = ctx_data.read();
        (guard.item_id, guard.stores.catalog.clone())
      };

      match catalog.find(item_id).await? {
        Some(item) => {
          ctx_data.write().item = Some(item);
          Ok::<_, CartError>(PipelineControl::Continue)
        }
        None => {
          warn!(item_id, "Add to cart: item is not in the catalog.");
          Err(CartError::ItemNotFound { item_id })
        }
      }
    })
  });

  p.on_step("increase_ledger_quantity", |ctx_data: ContextData<AddToCartCtxData>| {
    Box::pin(async move {
      let (item_id, ledger) = {
        let guard = ctx_data.read();
        (guard.item_id, guard.stores.ledger.clone())
      };

      let entry = ledger.increase(item_id).await?;
      info!(item_id, quantity = entry.quantity, "Add to cart: ledger quantity increased.");
      ctx_data.write().ledger_entry = Some(entry);
      Ok::<_, CartError>(PipelineControl::Continue)
    })
  });

  p.on_step("append_to_session", |ctx_data: ContextData<AddToCartCtxData>| {
    Box::pin(async move {
      let mut guard = ctx_data.write();
      let item_id = guard.item_id;
      guard.session.push(item_id);
      Ok::<_, CartError>(PipelineControl::Continue)
    })
  });

  p
}
