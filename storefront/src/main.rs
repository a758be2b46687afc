// storefront/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use storefront::config::AppConfig;
use storefront::web::configure_app_routes;
use storefront::{build_app_state, db};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()));
  let json_output = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

  let builder = tracing_subscriber::fmt()
    .with_env_filter(env_filter) // RUST_LOG overrides the INFO default
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration

  if json_output {
    builder.json().init();
  } else {
    builder.init();
  }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // .env has to be loaded before the filter reads RUST_LOG.
  dotenvy::dotenv().ok();
  init_tracing();

  tracing::info!("Starting storefront server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };
  tracing::debug!(config = ?app_config, "Configuration in effect.");

  let db_pool = match db::connect(&app_config.database_url).await {
    Ok(pool) => pool,
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
  };

  let server_address = app_config.server_address();
  let app_state = match build_app_state(&app_config, db_pool).await {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to prepare application state.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
  };

  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
