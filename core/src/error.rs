// sequitur/src/error.rs

//! Fault taxonomy for sequences.
//!
//! A fault is stored inside the chain, never returned from `Do`. It is either a
//! domain fault raised by a step's action, the contained-panic sentinel, or a
//! cancellation fault substituted by a decorator.

use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SequenceError {
  /// Sentinel stored when a step's action panicked and the panic was contained.
  #[error("step panicked")]
  Panic,

  /// Default fault substituted for a step that was never run because
  /// cancellation had already been requested.
  #[error("sequence cancelled")]
  Cancelled,

  /// Fault returned by a step's action.
  #[error("step failed: {source}")]
  Step {
    #[source]
    source: AnyhowError,
  },
}

impl SequenceError {
  /// Wraps any error as a domain fault.
  pub fn step<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    SequenceError::Step { source: err.into() }
  }

  /// True if this is the contained-panic sentinel.
  pub fn is_panic(&self) -> bool {
    matches!(self, SequenceError::Panic)
  }

  pub fn is_cancelled(&self) -> bool {
    matches!(self, SequenceError::Cancelled)
  }

  /// Returns the domain error carried by a `Step` fault, if it is a `T`.
  pub fn downcast_ref<T>(&self) -> Option<&T>
  where
    T: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
  {
    match self {
      SequenceError::Step { source } => source.downcast_ref::<T>(),
      _ => None,
    }
  }
}

// Actions returning `anyhow::Result<()>` land here through `Into<SequenceError>`.
impl From<AnyhowError> for SequenceError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap an anyhow error that is only carrying one of our own faults,
    // so `Panic`/`Cancelled` keep their identity instead of becoming `Step`.
    match err.downcast::<SequenceError>() {
      Ok(own) => own,
      Err(err) => SequenceError::Step { source: err },
    }
  }
}

pub type SequenceResult<T, E = SequenceError> = std::result::Result<T, E>;
