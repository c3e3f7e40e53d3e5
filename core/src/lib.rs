// sequitur/src/lib.rs

//! Sequitur: a fluent chain of named fallible steps.
//!
//! A sequence runs steps in call order and stops at the first fault:
//!  - `Do` (`step`) runs a named action unless the chain already faulted.
//!  - Panics inside an action are contained and stored as `SequenceError::Panic`.
//!  - `Catch` (`catch`) observes the fault once; `Then` (`then`) runs once on full success.
//!  - Exactly one of `Catch`/`Then` ever fires, after which the chain is inert.
//!
//! Decorators add behaviour without owning fault state:
//!  - `WithCancellation` polls a cancellation signal before every step.
//!  - `WithTracing` emits `tracing` events around every step.

pub mod core;
pub mod decorator;
pub mod error;
pub mod sequence;

// --- Re-exports for the Public API ---

pub use crate::core::control::ChainState;
pub use crate::core::sequence_trait::Sequence;
pub use crate::core::step::{Action, Completion, Consequence};

pub use crate::sequence::{Linear, SequenceExt};

pub use crate::decorator::cancellation::{CancellationSignal, WithCancellation};
pub use crate::decorator::traced::{WithTracing, TRACE_TARGET};

pub use crate::error::{SequenceError, SequenceResult};

/*
    Typical use:
    1. Create the innermost chain: `let mut seq = Linear::new();`
    2. Optionally wrap it, innermost first, borrowing it so it stays inspectable:
       `let mut traced = WithTracing::new(WithCancellation::new(&mut seq, token));`
    3. Chain steps: `traced.step("load", || load()).step("store", || store())`.
    4. Finish with `.catch(|step, err| ...)` and/or `.then(|| ...)`.
    5. Inspect `seq.error()` / `seq.last_step()`, or `seq.into_result()?`.
*/
