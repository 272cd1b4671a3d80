//! Core functionality for bramble property-based testing.
//!
//! This crate provides the building blocks: splittable [`Seed`]s, lazily
//! expanded shrink [`Tree`]s, composable [`Gen`]erators, and the runner that
//! checks properties with [`given`] and minimises failures with [`shrink`].
//!
//! Generators return a whole tree of values instead of a single value, so
//! shrinking follows the way a value was built and never produces something
//! its generator could not have.

pub mod args;
pub mod data;
pub mod error;
pub mod gen;
pub mod property;
pub mod seed;
pub mod shrink;
pub mod tree;

// Re-export the main types
pub use args::*;
pub use data::*;
pub use error::*;
pub use gen::*;
pub use property::*;
pub use seed::*;
pub use shrink::*;
pub use tree::*;
