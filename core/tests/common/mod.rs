// tests/common/mod.rs
#![allow(dead_code)]

use once_cell::sync::Lazy;
use shopcart::{CartResult, CartService, ContextData, InMemoryCatalog, InMemoryLedger, PipelineControl};
use std::future::Future;
use std::pin::Pin;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

type HandlerFuture = Pin<Box<dyn Future<Output = CartResult<PipelineControl>> + Send>>;

// --- Store fixtures ---

/// Catalog, ledger and a service wired to both. The concrete stores stay reachable so
/// tests can inspect rows or inject write failures.
pub struct Shop {
  pub catalog: Arc<InMemoryCatalog>,
  pub ledger: Arc<InMemoryLedger>,
  pub service: CartService,
}

pub fn shop_with(items: &[(&str, i64)]) -> Shop {
  let catalog = Arc::new(InMemoryCatalog::with_items(items));
  let ledger = Arc::new(InMemoryLedger::new());
  let service = CartService::new(catalog.clone(), ledger.clone());
  Shop { catalog, ledger, service }
}

pub fn item(id: i64, title: &str, price: i64) -> shopcart::Item {
  shopcart::Item {
    id,
    title: title.to_string(),
    price,
    is_active: true,
    description: format!("{} description", title),
    image: format!("{}.png", title),
  }
}

// --- Pipeline test context ---

#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

pub fn create_recording_handler(step_name: &'static str) -> shopcart::Handler<TestContext> {
  Box::new(move |ctx: ContextData<TestContext>| -> HandlerFuture {
    Box::pin(async move {
      HANDLER_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.steps_executed.push(step_name.to_string());
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

// --- Tracing ---

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub static HANDLER_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  HANDLER_EXEC_COUNTER.store(0, Ordering::SeqCst);
}
