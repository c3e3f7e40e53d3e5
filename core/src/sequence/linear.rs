// sequitur/src/sequence/linear.rs

//! Contains the `Linear` sequence: steps run one at a time in call order,
//! stopping at the first fault, with panics contained per step.

use crate::core::control::ChainState;
use crate::core::sequence_trait::Sequence;
use crate::core::step::{Action, Completion, Consequence};
use crate::error::{SequenceError, SequenceResult};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{event, Level};

const TARGET: &str = "sequitur::linear";

/// Sequential, single-owner implementation of [`Sequence`].
///
/// A `Linear` is created open and fault-free, mutated in place by each `Do`,
/// and terminated by the first `Catch` or `Then` that fires. After that it
/// stays readable but ignores every chain operation.
///
/// Panic containment relies on unwinding. Under `panic = "abort"` a panicking
/// step aborts the process.
#[derive(Debug)]
pub struct Linear {
  last_step: String,
  error: Option<SequenceError>,
  open: bool,
}

impl Linear {
  pub fn new() -> Self {
    Self {
      last_step: String::new(),
      error: None,
      open: true,
    }
  }

  /// Consumes the chain, returning the stored fault as an `Err`.
  ///
  /// Useful when the caller would rather propagate with `?` than react in `Catch`.
  pub fn into_result(self) -> SequenceResult<()> {
    match self.error {
      Some(fault) => Err(fault),
      None => Ok(()),
    }
  }

  fn accepts_steps(&self) -> bool {
    self.open && self.error.is_none()
  }

  fn set_last_step(&mut self, name: &str) {
    self.last_step.clear();
    self.last_step.push_str(name);
  }
}

impl Default for Linear {
  fn default() -> Self {
    Self::new()
  }
}

impl Sequence for Linear {
  fn perform(&mut self, name: &str, action: Action<'_>) {
    if !self.accepts_steps() {
      event!(target: TARGET, Level::TRACE, step = name, state = ?self.state(), "Step not run.");
      return;
    }

    self.set_last_step(name);
    event!(target: TARGET, Level::TRACE, step = name, "Running step.");

    self.error = match panic::catch_unwind(AssertUnwindSafe(action)) {
      Ok(Ok(())) => None,
      Ok(Err(fault)) => Some(fault),
      Err(payload) => {
        event!(
          target: TARGET,
          Level::ERROR,
          step = name,
          panic = panic_message(payload.as_ref()),
          "Step panicked; fault contained."
        );
        Some(SequenceError::Panic)
      }
    };
  }

  fn recover(&mut self, consequence: Consequence<'_>) {
    if !self.open {
      return;
    }
    let Some(fault) = self.error.as_ref() else {
      return;
    };

    self.open = false;
    event!(target: TARGET, Level::TRACE, step = %self.last_step, "Running consequence; chain terminated.");
    consequence(&self.last_step, fault);
  }

  fn complete(&mut self, completion: Completion<'_>) {
    if !self.accepts_steps() {
      return;
    }

    self.open = false;
    event!(target: TARGET, Level::TRACE, "Running completion; chain terminated.");
    completion();
  }

  fn record_fault(&mut self, name: &str, fault: SequenceError) {
    if !self.accepts_steps() {
      return;
    }

    self.set_last_step(name);
    event!(target: TARGET, Level::TRACE, step = name, error = %fault, "Fault recorded without running step.");
    self.error = Some(fault);
  }

  fn error(&self) -> Option<&SequenceError> {
    self.error.as_ref()
  }

  fn last_step(&self) -> &str {
    &self.last_step
  }

  fn state(&self) -> ChainState {
    ChainState::derive(self.open, self.error.is_some())
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
  if let Some(msg) = payload.downcast_ref::<&'static str>() {
    msg
  } else if let Some(msg) = payload.downcast_ref::<String>() {
    msg.as_str()
  } else {
    "<non-string panic payload>"
  }
}
