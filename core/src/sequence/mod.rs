// sequitur/src/sequence/mod.rs

//! The concrete `Linear` sequence and the fluent chaining API.

pub mod fluent;
pub mod linear;

pub use fluent::SequenceExt;
pub use linear::Linear;
