// storefront/src/config.rs

use crate::errors::{AppError, Result};
use actix_web::cookie::Key;
use dotenvy::dotenv;
use std::env;

/// Minimum length accepted for `SESSION_KEY`; shorter secrets cannot seed a cookie key.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,

  // Encrypts the session cookie. `None` means a fresh random key per process.
  pub session_secret: Option<String>,

  // Insert a few demo items when the catalog is empty at startup.
  pub seed_db: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL").unwrap_or_else(|_| "sqlite://shop.db".to_string());

    let session_secret = get_env("SESSION_KEY").ok();
    if let Some(secret) = &session_secret {
      if secret.len() < MIN_SESSION_SECRET_LEN {
        return Err(AppError::Config(format!(
          "SESSION_KEY must be at least {} bytes, got {}",
          MIN_SESSION_SECRET_LEN,
          secret.len()
        )));
      }
    }

    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      session_secret,
      seed_db,
    })
  }

  /// The key for the private session cookie.
  ///
  /// Without `SESSION_KEY` every restart generates a new key, which silently empties every
  /// shopper's cart list.
  pub fn session_key(&self) -> Key {
    match &self.session_secret {
      Some(secret) => Key::derive_from(secret.as_bytes()),
      None => {
        tracing::warn!("SESSION_KEY not set; generating a random session key for this process.");
        Key::generate()
      }
    }
  }

  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_url", &self.database_url)
      .field("session_secret", &self.session_secret.as_ref().map(|_| "[REDACTED]"))
      .field("seed_db", &self.seed_db)
      .finish()
  }
}
