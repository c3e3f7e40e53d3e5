// sequitur/src/decorator/mod.rs

//! Wrappers that implement [`Sequence`](crate::core::Sequence) by delegating
//! to an inner sequence while adding one cross-cutting behaviour.
//!
//! Decorators never own fault state. They compose innermost-first:
//! `WithTracing::new(WithCancellation::new(Linear::new(), token))`.

pub mod cancellation;
pub mod traced;

pub use cancellation::{CancellationSignal, WithCancellation};
pub use traced::WithTracing;
