// sequitur/examples/error_handling.rs

use sequitur::{Linear, Sequence, SequenceError, SequenceExt, WithTracing};
use tracing::{error, info};

// 1. Define a custom application error type
#[derive(Debug, thiserror::Error)]
enum InventoryError {
  #[error("out of stock: {0}")]
  OutOfStock(String),
}

impl From<InventoryError> for SequenceError {
  fn from(err: InventoryError) -> Self {
    SequenceError::step(err)
  }
}

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
  info!("--- Error Handling Example ---");

  // Scenario 1: a step returns a domain error
  info!("Scenario 1: step returns a domain error");
  let mut reserved = Vec::new();
  let mut seq = WithTracing::new(Linear::new());
  seq
    .step("reserve coffee", || -> Result<(), InventoryError> {
      reserved.push("coffee");
      Ok(())
    })
    .step("reserve bagel", || -> Result<(), InventoryError> {
      Err(InventoryError::OutOfStock("bagel".to_string()))
    })
    .step("charge card", || -> Result<(), InventoryError> {
      unreachable!("skipped after the first fault")
    })
    .catch(|step, err| error!(%step, error = %err, "Releasing reservations."))
    .then(|| info!("Not printed: the chain faulted."));
  assert!(matches!(
    seq.error().and_then(|e| e.downcast_ref::<InventoryError>()),
    Some(InventoryError::OutOfStock(item)) if item == "bagel"
  ));

  // Scenario 2: a step panics; the panic is contained
  info!("Scenario 2: step panics");
  let mut seq = WithTracing::new(Linear::new());
  seq
    .step("parse quantity", || -> anyhow::Result<()> {
      let quantities: Vec<u32> = Vec::new();
      info!(first = quantities[0], "Unreachable.");
      Ok(())
    })
    .catch(|step, err| {
      assert!(err.is_panic());
      error!(%step, "Contained a panic.");
    });

  // Scenario 3: no Catch; propagate with `?` instead
  info!("Scenario 3: propagate with into_result");
  match checkout() {
    Ok(()) => error!("Checkout unexpectedly succeeded."),
    Err(e) => info!(error = %e, "Checkout failed as expected."),
  }
}

fn checkout() -> Result<(), SequenceError> {
  let mut seq = Linear::new();
  seq.step("authorize", || -> anyhow::Result<()> { anyhow::bail!("card declined") });
  seq.into_result()
}
