// sequitur/src/core/control.rs

//! Lifecycle state of a sequence.

/// Where a chain sits in its lifecycle.
///
/// `Pending -> Faulted -> Terminated` or `Pending -> Terminated`. Terminal
/// transitions are made by `Catch` (from `Faulted`) or `Then` (from `Pending`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
  /// Open and fault-free; `Do` bodies still run.
  Pending,
  /// Open with a stored fault; later `Do` bodies are skipped.
  Faulted,
  /// A `Catch` or `Then` callback has fired. Every chain method is a no-op.
  Terminated,
}

impl ChainState {
  pub(crate) fn derive(open: bool, faulted: bool) -> Self {
    match (open, faulted) {
      (false, _) => ChainState::Terminated,
      (true, true) => ChainState::Faulted,
      (true, false) => ChainState::Pending,
    }
  }

  /// True while `Catch`/`Then` can still fire.
  pub fn is_open(self) -> bool {
    !matches!(self, ChainState::Terminated)
  }
}
