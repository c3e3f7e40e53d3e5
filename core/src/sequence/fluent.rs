// sequitur/src/sequence/fluent.rs

//! Fluent chaining methods for any [`Sequence`].
//!
//! User closures are adapted into the boxed [`Action`], [`Consequence`] and
//! [`Completion`] shapes the trait takes, converting the action's own error
//! type into `SequenceError` on the way.

use crate::core::control::ChainState;
use crate::core::sequence_trait::Sequence;
use crate::core::step::{Action, Completion, Consequence};
use crate::error::SequenceError;

/// Chaining surface over [`Sequence`]: `step` (`Do`), `catch` and `then`.
///
/// Implemented for every `Sequence`, including `dyn Sequence`.
///
/// ```
/// use sequitur::{Linear, SequenceExt};
///
/// let mut out = String::new();
/// Linear::new()
///   .step("a", || -> anyhow::Result<()> { out.push('a'); Ok(()) })
///   .catch(|_, _| unreachable!())
///   .then(|| println!("done"));
/// assert_eq!(out, "a");
/// ```
pub trait SequenceExt: Sequence {
  /// Runs `action` as step `name` unless the chain already faulted or terminated.
  fn step<F, E>(&mut self, name: &str, action: F) -> &mut Self
  where
    F: FnOnce() -> Result<(), E>,
    E: Into<SequenceError>,
  {
    let action: Action<'_> = Box::new(move || action().map_err(Into::into));
    self.perform(name, action);
    self
  }

  /// Invokes `consequence` with the failing step's name and fault, once.
  fn catch<F>(&mut self, consequence: F) -> &mut Self
  where
    F: FnOnce(&str, &SequenceError),
  {
    let consequence: Consequence<'_> = Box::new(consequence);
    self.recover(consequence);
    self
  }

  /// Invokes `completion` if every step succeeded, once.
  fn then<F>(&mut self, completion: F) -> &mut Self
  where
    F: FnOnce(),
  {
    let completion: Completion<'_> = Box::new(completion);
    self.complete(completion);
    self
  }

  fn is_faulted(&self) -> bool {
    self.error().is_some()
  }

  fn is_open(&self) -> bool {
    self.state().is_open()
  }
}

impl<S: Sequence + ?Sized> SequenceExt for S {}
