// sequitur/examples/cancellation.rs

use sequitur::{Linear, Sequence, SequenceExt, WithCancellation, WithTracing};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
  info!("--- Cancellation Example ---");

  let token = CancellationToken::new();
  let mut inner = Linear::new();

  {
    let mut seq = WithTracing::new(WithCancellation::new(&mut inner, token.clone()));
    for batch in 0..5 {
      seq.step(&format!("batch {batch}"), || -> anyhow::Result<()> {
        std::thread::sleep(Duration::from_millis(10));
        if batch == 2 {
          // Shutdown requested while this batch is running; it still finishes.
          token.cancel();
        }
        Ok(())
      });
    }
    seq.catch(|step, err| info!(%step, error = %err, "Stopped early."));
  }

  info!(last_step = inner.last_step(), "Inner chain after cancellation.");
  assert_eq!(inner.last_step(), "batch 3");
}
