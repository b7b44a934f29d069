// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset

use once_cell::sync::Lazy;
use pricehound::{ContextData, Handler, PipelineControl, PipelineError, Price, Product, Size};
use tracing::Level;

// --- Pipeline test context ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("pipeline error: {0}")]
  Pipeline(String),

  #[error("test handler failed: {0}")]
  Handler(String),
}

impl From<PipelineError> for TestError {
  fn from(err: PipelineError) -> Self {
    TestError::Pipeline(format!("{:?}", err))
  }
}

pub fn create_simple_handler(step_name: &'static str, message_to_append: &'static str) -> Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name.to_string());
      tracing::debug!(target: "test_handlers", step = step_name, counter = guard.counter, "executed");
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn create_failing_handler(step_name: &'static str, error_message: &'static str) -> Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

// --- Catalog fixtures ---

/// A product whose first size costs `product + logistics` minor units.
pub fn priced_product(id: u64, name: &str, product: u64, logistics: u64) -> Product {
  Product {
    id,
    brand: "Acme".to_string(),
    name: name.to_string(),
    review_rating: 4.7,
    feedbacks: 128,
    supplier: "ООО Ромашка".to_string(),
    sizes: vec![Size {
      price: Price {
        basic: product + 1000,
        product,
        logistics,
      },
    }],
  }
}

pub fn unpriced_product(id: u64, name: &str) -> Product {
  Product {
    id,
    name: name.to_string(),
    ..Default::default()
  }
}

// --- Tracing, initialised once per test binary ---
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
