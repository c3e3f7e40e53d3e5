pub mod control;
pub mod sequence_trait;
pub mod step;

// Re-export key types for easier access from other modules (and lib.rs)
pub use control::ChainState;
pub use sequence_trait::Sequence;
pub use step::{Action, Completion, Consequence};
