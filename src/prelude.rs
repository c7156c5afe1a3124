//! Exports the standard learners, classifiers, and traits.
//!
pub use crate::error::C45Error;


pub use crate::sample::{
    Sample,
    SampleReader,
    Record,
    Point,
    Value,
};


pub use crate::hypothesis::Classifier;


pub use crate::weak_learner::{
    // WeakLearner trait
    WeakLearner,

    // Decision tree
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    build_tree,
};


pub use crate::pruning::{
    PruneMethod,
    prune,
};


pub use crate::forest::{
    // EnsembleBuilder trait
    EnsembleBuilder,

    // Bagged forest
    ForestBuilder,
    Forest,
    IterationStats,
    build_forest,
};
