// sequitur/src/core/step.rs

//! Callable shapes a sequence accepts.

use crate::error::SequenceError;

/// A named unit of work submitted to a sequence.
///
/// Returns `Ok(())` on success or the fault that stops the chain. The action
/// runs at most once, synchronously, on the caller's thread. It may borrow
/// from the caller's stack (`'a`), since a sequence never outlives its call site.
pub type Action<'a> = Box<dyn FnOnce() -> Result<(), SequenceError> + 'a>;

/// Failure handler invoked by `Catch` with the name of the step that faulted
/// and a borrow of the stored fault.
pub type Consequence<'a> = Box<dyn FnOnce(&str, &SequenceError) + 'a>;

/// Completion callback invoked by `Then` when no step faulted.
pub type Completion<'a> = Box<dyn FnOnce() + 'a>;
