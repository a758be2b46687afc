// storefront/src/web/routes.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::error;

use crate::state::AppState;
use crate::web::handlers::{cart_handlers, catalog_handlers};

/// Liveness, including a round trip to the database.
async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  match sqlx::query("SELECT 1").execute(&app_state.db_pool).await {
    Ok(_) => HttpResponse::Ok().json(json!({ "status": "ok" })),
    Err(e) => {
      error!(error = %e, "Health check could not reach the database.");
      HttpResponse::ServiceUnavailable().json(json!({ "status": "unavailable" }))
    }
  }
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/health", web::get().to(health_check_handler))
    // Catalog
    .route("/", web::get().to(catalog_handlers::index_handler))
    .service(
      web::resource("/create")
        .route(web::get().to(catalog_handlers::admin_items_handler))
        .route(web::post().to(catalog_handlers::create_item_handler)),
    )
    .route(
      "/delete_item/{item_id}",
      web::post().to(catalog_handlers::delete_item_handler),
    )
    .service(
      web::resource("/delete_all_items")
        .route(web::get().to(catalog_handlers::delete_all_items_handler))
        .route(web::post().to(catalog_handlers::delete_all_items_handler)),
    )
    .route(
      "/activate/{item_id}",
      web::post().to(catalog_handlers::activate_item_handler),
    )
    .route(
      "/deactivate/{item_id}",
      web::post().to(catalog_handlers::deactivate_item_handler),
    )
    // Cart
    .route(
      "/add_to_cart/{item_id}",
      web::post().to(cart_handlers::add_to_cart_handler),
    )
    .service(
      web::scope("/cart")
        .route("", web::get().to(cart_handlers::view_cart_handler))
        .route("/remove/{item_id}", web::post().to(cart_handlers::remove_from_cart_handler))
        .route(
          "/increase_quantity/{item_id}",
          web::post().to(cart_handlers::increase_quantity_handler),
        )
        .route(
          "/decrease_quantity/{item_id}",
          web::post().to(cart_handlers::decrease_quantity_handler),
        )
        .route("/reset_quantity", web::post().to(cart_handlers::reset_quantity_handler)),
    );
}
