// storefront/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use shopcart::CartError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Cart Error: {0}")]
  Cart(#[from] CartError),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Session Error: {0}")]
  Session(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Cart(cart_err) => cart_error_response(cart_err),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Sqlx(_) => HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"})),
      AppError::Session(m) => HttpResponse::BadRequest().json(json!({"error": "Session could not be updated", "detail": m})),
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

fn cart_error_response(err: &CartError) -> HttpResponse {
  match err {
    CartError::ItemNotFound { .. } => HttpResponse::NotFound().json(json!({"notice": err.notice()})),
    CartError::LedgerEntryNotFound { item_id } => {
      HttpResponse::NotFound().json(json!({"error": format!("Item {} is not in the cart ledger.", item_id)}))
    }
    CartError::AmountOverflow { item_id } => HttpResponse::UnprocessableEntity()
      .json(json!({"error": format!("The cart amount for item {} is too large to compute.", item_id)})),
    CartError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
    CartError::Persistence { source } => {
      tracing::error!(persistence_error = ?source, "Persistence failure details");
      HttpResponse::InternalServerError().json(json!({"error": "Your change could not be saved. Please try again."}))
    }
    CartError::HandlerMissing { .. } => {
      HttpResponse::InternalServerError().json(json!({"error": "Cart workflow is misconfigured"}))
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
