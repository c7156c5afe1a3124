/// Defines the decision tree learner.
pub mod decision_tree_algorithm;
/// Defines the classifier produced by `DecisionTree`.
pub mod decision_tree_classifier;
/// Defines a builder for `DecisionTree`.
pub mod builder;
/// Entropy and information gain.
pub mod entropy;
/// Hooks that observe tree growth.
pub mod monitor;

/// Defines the inner representations of `DecisionTreeClassifier`.
mod node;
mod criterion;
mod split_rule;
mod train_node;


pub use builder::{
    DecisionTreeBuilder,
    DEFAULT_MIN_DEPTH,
    DEFAULT_INFO_THRESHOLD,
};
pub use decision_tree_algorithm::{DecisionTree, build_tree};
pub use decision_tree_classifier::DecisionTreeClassifier;
pub use criterion::{BestSplit, best_split};
pub use monitor::{GrowthMonitor, TraceMonitor, RecordingMonitor};
pub use node::{Node, NodeIndex};
pub use split_rule::SplitRule;
pub use train_node::{TreeNode, NumericChildren};

pub(crate) use split_rule::{partition_numeric, partition_categorical};
