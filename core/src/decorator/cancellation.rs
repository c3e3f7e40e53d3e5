// sequitur/src/decorator/cancellation.rs

//! Cancellation-aware sequence wrapper and the signal it polls.

use crate::core::control::ChainState;
use crate::core::sequence_trait::Sequence;
use crate::core::step::{Action, Completion, Consequence};
use crate::error::SequenceError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{event, Level};

const TARGET: &str = "sequitur::cancellation";

/// An externally owned cancellation source.
///
/// `is_cancelled` must not block: it is polled once at every `Do` boundary.
pub trait CancellationSignal {
  fn is_cancelled(&self) -> bool;

  /// Fault stored for a step that was not run because of cancellation.
  fn cancellation_fault(&self) -> SequenceError {
    SequenceError::Cancelled
  }
}

impl CancellationSignal for AtomicBool {
  fn is_cancelled(&self) -> bool {
    self.load(Ordering::Acquire)
  }
}

impl<T: CancellationSignal + ?Sized> CancellationSignal for &T {
  fn is_cancelled(&self) -> bool {
    (**self).is_cancelled()
  }

  fn cancellation_fault(&self) -> SequenceError {
    (**self).cancellation_fault()
  }
}

impl<T: CancellationSignal + ?Sized> CancellationSignal for Arc<T> {
  fn is_cancelled(&self) -> bool {
    (**self).is_cancelled()
  }

  fn cancellation_fault(&self) -> SequenceError {
    (**self).cancellation_fault()
  }
}

#[cfg(feature = "cancellation-token")]
impl CancellationSignal for tokio_util::sync::CancellationToken {
  fn is_cancelled(&self) -> bool {
    tokio_util::sync::CancellationToken::is_cancelled(self)
  }
}

/// Polls a [`CancellationSignal`] before every `Do`.
///
/// Once the signal reports cancelled, the step is recorded with the signal's
/// cancellation fault and its action never runs. Cancellation raised while a
/// step is running is only seen at the next `Do`. `Catch` and `Then` delegate
/// unchanged.
pub struct WithCancellation<S, C> {
  inner: S,
  signal: C,
}

impl<S, C> WithCancellation<S, C>
where
  S: Sequence,
  C: CancellationSignal,
{
  pub fn new(inner: S, signal: C) -> Self {
    Self { inner, signal }
  }

  pub fn inner(&self) -> &S {
    &self.inner
  }

  pub fn signal(&self) -> &C {
    &self.signal
  }

  pub fn into_inner(self) -> S {
    self.inner
  }
}

impl<S, C> Sequence for WithCancellation<S, C>
where
  S: Sequence,
  C: CancellationSignal,
{
  fn perform(&mut self, name: &str, action: Action<'_>) {
    if self.signal.is_cancelled() {
      event!(target: TARGET, Level::DEBUG, step = name, "Cancellation observed; step not run.");
      self.inner.record_fault(name, self.signal.cancellation_fault());
      return;
    }

    self.inner.perform(name, action);
  }

  fn recover(&mut self, consequence: Consequence<'_>) {
    self.inner.recover(consequence);
  }

  fn complete(&mut self, completion: Completion<'_>) {
    self.inner.complete(completion);
  }

  fn record_fault(&mut self, name: &str, fault: SequenceError) {
    self.inner.record_fault(name, fault);
  }

  fn error(&self) -> Option<&SequenceError> {
    self.inner.error()
  }

  fn last_step(&self) -> &str {
    self.inner.last_step()
  }

  fn state(&self) -> ChainState {
    self.inner.state()
  }
}

impl<S: std::fmt::Debug, C> std::fmt::Debug for WithCancellation<S, C> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("WithCancellation")
      .field("inner", &self.inner)
      .field("signal", &std::any::type_name::<C>())
      .finish()
  }
}
