//! Bagged forests of C4.5 trees.
//!
//! A forest has a fixed number of slots.
//! [`ForestBuilder`] repeatedly fills the empty slots with trees grown
//! on bootstrap subsets, scores every member on its own held-out
//! bootstrap subset, and empties the slots that fall too far
//! behind the best member.

/// Provides the `EnsembleBuilder` trait.
pub mod core;
/// Defines the forest generation loop.
pub mod forest_algorithm;
/// Defines the forest classifier.
pub mod forest_struct;
/// Defines per-iteration statistics.
pub mod stats;


pub use self::core::EnsembleBuilder;
pub use forest_algorithm::{
    ForestBuilder,
    build_forest,
    bootstrap,
    DEFAULT_FOREST_SIZE,
    DEFAULT_THRESHOLD_DEVIATION,
    DEFAULT_MAX_ITERATIONS,
};
pub use forest_struct::{Forest, ForestMember};
pub use stats::IterationStats;
