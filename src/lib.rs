#![warn(missing_docs)]

//!
//! A crate that grows C4.5 decision trees and bagged forests of them.
//!
//! - [`DecisionTree`] grows an entropy-driven C4.5 tree
//!   over numeric and categorical attributes.
//!   The result, [`DecisionTreeClassifier`], is a flat node table
//!   that routes a [`Record`] to a label.
//! - [`DecisionTreeClassifier::prune`] simplifies a grown tree
//!   against reference rows,
//!   either by reduced-error pruning ([`PruneMethod::Score`])
//!   or by information gain ([`PruneMethod::Entropy`]).
//! - [`ForestBuilder`] keeps a fixed number of slots filled with
//!   pruned trees grown on bootstrap subsets,
//!   and eliminates the members that score too far below the best one.
//!   The resulting [`Forest`] classifies by majority vote.
//!
//! Trees serialize to a nested JSON interchange format
//! through `serde`.
//!
//! # Example
//! ```no_run
//! use miniforest::prelude::*;
//!
//! let sample = SampleReader::new()
//!     .file("golf.csv")
//!     .has_header(true)
//!     .target_feature("play")
//!     .read()
//!     .unwrap();
//!
//! let tree = build_tree(&sample, 2, 0.05).unwrap();
//! let point = Point::new()
//!     .with("outlook", "sunny")
//!     .with("humidity", 85.0);
//! println!("{}", tree.classify(&point).unwrap());
//! ```

pub mod error;
pub mod sample;
pub mod common;
pub mod hypothesis;
pub mod weak_learner;
pub mod pruning;
pub mod forest;
pub mod research;

pub mod prelude;


pub use error::C45Error;

pub use sample::{
    Sample,
    SampleRow,
    SampleReader,
    AttributeKind,
    Feature,
    NumericFeature,
    CategoricalFeature,
    Record,
    Point,
    Value,
    ValueRef,
};

pub use hypothesis::Classifier;

pub use weak_learner::{
    WeakLearner,
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    build_tree,
};

pub use weak_learner::decision_tree::{
    Node,
    NodeIndex,
    SplitRule,
    TreeNode,
    NumericChildren,
    GrowthMonitor,
    TraceMonitor,
    RecordingMonitor,
};

pub use pruning::{PruneMethod, prune, DEFAULT_ENTROPY_THRESHOLD};

pub use forest::{
    EnsembleBuilder,
    ForestBuilder,
    Forest,
    ForestMember,
    IterationStats,
    build_forest,
};
