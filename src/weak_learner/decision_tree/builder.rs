use crate::{DecisionTree, C45Error};
use crate::common::checker;


/// The depth below which a split is kept regardless of its gain.
pub const DEFAULT_MIN_DEPTH: usize = 2;
/// The information gain below which a node becomes a leaf.
pub const DEFAULT_INFO_THRESHOLD: f64 = 0.05;


/// A struct that builds `DecisionTree`.
/// `DecisionTreeBuilder` keeps parameters for constructing `DecisionTree`.
///
/// # Example
///
/// ```
/// use miniforest::prelude::*;
///
/// let weak_learner = DecisionTreeBuilder::new()
///     .min_depth(1)
///     .info_threshold(0.1)
///     .max_depth(8)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DecisionTreeBuilder {
    min_depth: usize,
    info_threshold: f64,
    max_depth: Option<usize>,
}


impl DecisionTreeBuilder {
    /// Construct a new instance of [`DecisionTreeBuilder`].
    /// By default, [`DecisionTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// min_depth: DEFAULT_MIN_DEPTH == 2,
    /// info_threshold: DEFAULT_INFO_THRESHOLD == 0.05,
    /// max_depth: None (unbounded),
    /// ```
    pub fn new() -> Self {
        Self {
            min_depth: DEFAULT_MIN_DEPTH,
            info_threshold: DEFAULT_INFO_THRESHOLD,
            max_depth: None,
        }
    }


    /// Nodes shallower than `depth` are split
    /// even when the gain is below the threshold.
    /// Default is `2`.
    pub fn min_depth(mut self, depth: usize) -> Self {
        self.min_depth = depth;
        self
    }


    /// Set the information gain below which a node
    /// (at depth `≥ min_depth`) becomes a leaf.
    /// Default is `0.05`.
    pub fn info_threshold(mut self, threshold: f64) -> Self {
        self.info_threshold = threshold;
        self
    }


    /// Specify the maximal depth of the tree.
    /// `0` yields a single leaf holding the mode label.
    /// By default, the depth is unbounded.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }


    /// Build a `DecisionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> Result<DecisionTree, C45Error> {
        checker::check_finite("info_threshold", self.info_threshold)?;

        let dtree = DecisionTree::from_components(
            self.min_depth, self.info_threshold, self.max_depth
        );
        Ok(dtree)
    }
}


impl Default for DecisionTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
