// storefront/src/web/handlers/catalog_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use shopcart::{ItemId, NewItem, Notice};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::models::item::CreateItemPayload;
use crate::state::AppState;

/// Storefront index: every item, cheapest first.
#[instrument(name = "handler::index", skip(app_state))]
pub async fn index_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let items = app_state.catalog().list_by_price().await?;
  info!("Fetched {} items for the storefront.", items.len());
  Ok(HttpResponse::Ok().json(json!({ "items": items })))
}

/// Admin page: every item in id order.
#[instrument(name = "handler::admin_items", skip(app_state))]
pub async fn admin_items_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let items = app_state.catalog().list_all().await?;
  Ok(HttpResponse::Ok().json(json!({ "items": items })))
}

#[instrument(name = "handler::create_item", skip(app_state, payload), fields(title = %payload.title))]
pub async fn create_item_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CreateItemPayload>,
) -> Result<HttpResponse, AppError> {
  let new_item: NewItem = payload.into_inner().into();
  let item = app_state.catalog().create(new_item).await?;
  info!(item_id = item.id, "Item created.");
  Ok(HttpResponse::Created().json(json!({ "item": item })))
}

/// Deletes the item. Its ledger row, if any, stays behind and stops rendering.
#[instrument(name = "handler::delete_item", skip(app_state), fields(item_id = %path.as_ref()))]
pub async fn delete_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<ItemId>,
) -> Result<HttpResponse, AppError> {
  app_state.catalog().delete(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({ "notice": Notice::item_deleted() })))
}

#[instrument(name = "handler::delete_all_items", skip(app_state))]
pub async fn delete_all_items_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let deleted = app_state.catalog().delete_all().await?;
  warn!(deleted, "All catalog items deleted.");
  Ok(HttpResponse::Ok().json(json!({ "deleted": deleted })))
}

#[instrument(name = "handler::activate_item", skip(app_state), fields(item_id = %path.as_ref()))]
pub async fn activate_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<ItemId>,
) -> Result<HttpResponse, AppError> {
  let item = app_state.catalog().set_active(path.into_inner(), true).await?;
  Ok(HttpResponse::Ok().json(json!({ "item": item })))
}

#[instrument(name = "handler::deactivate_item", skip(app_state), fields(item_id = %path.as_ref()))]
pub async fn deactivate_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<ItemId>,
) -> Result<HttpResponse, AppError> {
  let item = app_state.catalog().set_active(path.into_inner(), false).await?;
  Ok(HttpResponse::Ok().json(json!({ "item": item })))
}
