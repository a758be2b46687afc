// storefront/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use shopcart::{ItemId, QuantityChange};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::session::{session_cookie, SessionCart};
use crate::state::AppState;

#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, session),
  fields(item_id = %path.as_ref(), session_len = session.list().len())
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<ItemId>,
  session: SessionCart,
) -> Result<HttpResponse, AppError> {
  let item_id = path.into_inner();

  // ItemNotFound propagates as a 404 carrying the notice; the cookie is not rewritten.
  let update = app_state.cart.add_to_cart(session.list(), item_id).await?;
  let cookie = session_cookie(&update.session, &app_state.session_key)?;

  Ok(HttpResponse::Ok().cookie(cookie).json(json!({
      "notice": update.notice,
      "ledger_entry": update.ledger_entry,
      "cart_size": update.session.len(),
  })))
}

#[instrument(name = "handler::view_cart", skip(app_state, session), fields(session_len = session.list().len()))]
pub async fn view_cart_handler(
  app_state: web::Data<AppState>,
  session: SessionCart,
) -> Result<HttpResponse, AppError> {
  let view = app_state.cart.view_cart(session.list()).await?;
  info!(lines = view.lines.len(), total = view.total, "Cart rendered.");
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(
  name = "handler::remove_from_cart",
  skip(app_state, session),
  fields(item_id = %path.as_ref(), session_len = session.list().len())
)]
pub async fn remove_from_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<ItemId>,
  session: SessionCart,
) -> Result<HttpResponse, AppError> {
  let item_id = path.into_inner();
  let update = app_state.cart.remove_from_cart(session.list(), item_id).await?;

  let mut response = if update.notice.is_success() {
    HttpResponse::Ok()
  } else {
    HttpResponse::NotFound()
  };
  let cookie = session_cookie(&update.session, &app_state.session_key)?;

  Ok(response.cookie(cookie).json(json!({
      "notice": update.notice,
      "ledger_entry": update.ledger_entry,
      "cart_size": update.session.len(),
  })))
}

#[instrument(name = "handler::increase_quantity", skip(app_state, session), fields(item_id = %path.as_ref()))]
pub async fn increase_quantity_handler(
  app_state: web::Data<AppState>,
  path: web::Path<ItemId>,
  session: SessionCart,
) -> Result<HttpResponse, AppError> {
  let entry = app_state.cart.increase_quantity(path.into_inner()).await?;
  let view = app_state.cart.view_cart(session.list()).await?;

  Ok(HttpResponse::Ok().json(json!({
      "ledger_entry": entry,
      "cart": view,
  })))
}

#[instrument(name = "handler::decrease_quantity", skip(app_state, session), fields(item_id = %path.as_ref()))]
pub async fn decrease_quantity_handler(
  app_state: web::Data<AppState>,
  path: web::Path<ItemId>,
  session: SessionCart,
) -> Result<HttpResponse, AppError> {
  let change = app_state.cart.decrease_quantity(path.into_inner()).await?;
  let (outcome, ledger_entry) = match change {
    Some(QuantityChange::Decremented(entry)) => ("decremented", Some(entry)),
    Some(QuantityChange::Removed { .. }) => ("removed", None),
    Some(QuantityChange::Unchanged(entry)) => ("unchanged", Some(entry)),
    None => ("no_entry", None),
  };
  let view = app_state.cart.view_cart(session.list()).await?;

  Ok(HttpResponse::Ok().json(json!({
      "outcome": outcome,
      "ledger_entry": ledger_entry,
      "cart": view,
  })))
}

#[instrument(name = "handler::reset_quantity", skip(app_state, session))]
pub async fn reset_quantity_handler(
  app_state: web::Data<AppState>,
  session: SessionCart,
) -> Result<HttpResponse, AppError> {
  let rows = app_state.cart.reset_quantities().await?;
  let view = app_state.cart.view_cart(session.list()).await?;

  Ok(HttpResponse::Ok().json(json!({
      "rows_reset": rows,
      "cart": view,
  })))
}
