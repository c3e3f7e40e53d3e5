// sequitur/src/core/sequence_trait.rs

//! Defines the `Sequence` capability shared by `Linear` and every decorator.

use crate::core::control::ChainState;
use crate::core::step::{Action, Completion, Consequence};
use crate::error::SequenceError;

/// A chain of named fallible steps where the first fault short-circuits
/// every later step.
///
/// The trait is object-safe; the fluent, generic surface (`step`, `catch`,
/// `then`) lives on [`SequenceExt`](crate::sequence::SequenceExt), which is
/// implemented for every `Sequence`.
///
/// Decorators implement this trait by delegating to an inner sequence. Only
/// the innermost concrete sequence owns fault state; decorators read it
/// through `error()` and write it through `record_fault()`.
pub trait Sequence {
  /// `Do`: if the chain is open and fault-free, record `name` as the last step
  /// and run `action`, storing its fault. Otherwise the action never runs.
  fn perform(&mut self, name: &str, action: Action<'_>);

  /// `Catch`: if the chain is open and faulted, invoke `consequence` once
  /// with the last step name and fault, then close the chain.
  fn recover(&mut self, consequence: Consequence<'_>);

  /// `Then`: if the chain is open and fault-free, invoke `completion` once,
  /// then close the chain.
  fn complete(&mut self, completion: Completion<'_>);

  /// Stores `fault` for step `name` without running anything.
  ///
  /// Has no effect unless the chain is open and fault-free: a stored fault
  /// is final for the lifetime of the chain.
  fn record_fault(&mut self, name: &str, fault: SequenceError);

  /// The stored fault, if any step has faulted.
  fn error(&self) -> Option<&SequenceError>;

  /// Name of the most recently attempted step, or `""` if none ran.
  fn last_step(&self) -> &str;

  fn state(&self) -> ChainState;
}

impl<S: Sequence + ?Sized> Sequence for &mut S {
  fn perform(&mut self, name: &str, action: Action<'_>) {
    (**self).perform(name, action)
  }

  fn recover(&mut self, consequence: Consequence<'_>) {
    (**self).recover(consequence)
  }

  fn complete(&mut self, completion: Completion<'_>) {
    (**self).complete(completion)
  }

  fn record_fault(&mut self, name: &str, fault: SequenceError) {
    (**self).record_fault(name, fault)
  }

  fn error(&self) -> Option<&SequenceError> {
    (**self).error()
  }

  fn last_step(&self) -> &str {
    (**self).last_step()
  }

  fn state(&self) -> ChainState {
    (**self).state()
  }
}

impl<S: Sequence + ?Sized> Sequence for Box<S> {
  fn perform(&mut self, name: &str, action: Action<'_>) {
    (**self).perform(name, action)
  }

  fn recover(&mut self, consequence: Consequence<'_>) {
    (**self).recover(consequence)
  }

  fn complete(&mut self, completion: Completion<'_>) {
    (**self).complete(completion)
  }

  fn record_fault(&mut self, name: &str, fault: SequenceError) {
    (**self).record_fault(name, fault)
  }

  fn error(&self) -> Option<&SequenceError> {
    (**self).error()
  }

  fn last_step(&self) -> &str {
    (**self).last_step()
  }

  fn state(&self) -> ChainState {
    (**self).state()
  }
}
