// sequitur/src/decorator/traced.rs

//! Observability wrapper emitting `tracing` events around each step.

use crate::core::control::ChainState;
use crate::core::sequence_trait::Sequence;
use crate::core::step::{Action, Completion, Consequence};
use crate::error::SequenceError;
use tracing::{dispatcher, event, Dispatch, Level};

/// Target of every event emitted by [`WithTracing`].
pub const TRACE_TARGET: &str = "sequitur::step";

/// Emits one trace per `Do`, without changing chain semantics.
///
/// | situation                    | level | message           | fields         |
/// |------------------------------|-------|-------------------|----------------|
/// | before running a step        | DEBUG | `starting: <name>`| `step`         |
/// | step succeeded               | INFO  | `<name>`          | `step`         |
/// | step faulted                 | WARN  | `<name>`          | `step`, `error`|
/// | step bypassed                | DEBUG | `skipped: <name>` | `step`         |
///
/// A step is bypassed when the chain is no longer pending (it faulted or a
/// terminal callback already fired). `Catch` and `Then` emit nothing.
///
/// By default events go to the dispatcher current for the calling thread,
/// falling back to the global default. [`with_dispatch`](Self::with_dispatch)
/// routes them to an explicit sink instead.
pub struct WithTracing<S> {
  inner: S,
  dispatch: Option<Dispatch>,
}

impl<S: Sequence> WithTracing<S> {
  pub fn new(inner: S) -> Self {
    Self { inner, dispatch: None }
  }

  pub fn with_dispatch(inner: S, dispatch: Dispatch) -> Self {
    Self {
      inner,
      dispatch: Some(dispatch),
    }
  }

  pub fn inner(&self) -> &S {
    &self.inner
  }

  pub fn into_inner(self) -> S {
    self.inner
  }

  fn emit(&self, f: impl FnOnce()) {
    match &self.dispatch {
      Some(dispatch) => dispatcher::with_default(dispatch, f),
      None => f(),
    }
  }
}

impl<S: Sequence> Sequence for WithTracing<S> {
  fn perform(&mut self, name: &str, action: Action<'_>) {
    if self.inner.state() != ChainState::Pending {
      self.emit(|| event!(target: TRACE_TARGET, Level::DEBUG, step = name, "skipped: {}", name));
      return;
    }

    self.emit(|| event!(target: TRACE_TARGET, Level::DEBUG, step = name, "starting: {}", name));
    self.inner.perform(name, action);

    match self.inner.error() {
      None => self.emit(|| event!(target: TRACE_TARGET, Level::INFO, step = name, "{}", name)),
      Some(fault) => self.emit(|| event!(target: TRACE_TARGET, Level::WARN, step = name, error = %fault, "{}", name)),
    }
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

impl<S: std::fmt::Debug> std::fmt::Debug for WithTracing<S> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("WithTracing")
      .field("inner", &self.inner)
      .field("dispatch_injected", &self.dispatch.is_some())
      .finish()
  }
}
