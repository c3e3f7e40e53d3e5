// sequitur/examples/basic_sequence.rs

use sequitur::{Linear, Sequence, SequenceExt, WithTracing};
use tracing::info;

#[derive(Debug, Default)]
struct Order {
  items: Vec<(&'static str, u32)>,
  total_cents: u32,
  receipt: Option<String>,
}

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
  info!("--- Basic Sequence Example ---");

  let mut order = Order::default();
  let mut seq = WithTracing::new(Linear::new());

  seq
    .step("add items", || -> anyhow::Result<()> {
      order.items.push(("coffee", 350));
      order.items.push(("croissant", 275));
      Ok(())
    })
    .step("total", || -> anyhow::Result<()> {
      order.total_cents = order.items.iter().map(|(_, cents)| cents).sum();
      Ok(())
    })
    .step("receipt", || -> anyhow::Result<()> {
      order.receipt = Some(format!("{} items, {} cents", order.items.len(), order.total_cents));
      Ok(())
    })
    .catch(|step, err| tracing::error!(%step, error = %err, "Order failed."))
    .then(|| info!("Order complete."));

  info!(last_step = seq.last_step(), state = ?seq.state(), "Final chain state.");
  info!(?order, "Final order.");
  assert_eq!(order.total_cents, 625);
}
