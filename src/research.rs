//! This directory provides some features for research.
//! Measure the followings of the forest loop per iteration
//! - Running time
//! - Member scores (mean, max, min)
//! - Ensemble accuracy
//! - Number of eliminated slots

/// Defines a logger that drives an ensemble loop.
pub mod logger;

pub use logger::{Logger, Research};
