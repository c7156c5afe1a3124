use crate::{Sample, WeakLearner, C45Error};
use crate::common::utils::{mode_label, is_pure};


use super::{
    criterion::*,
    split_rule::*,
    train_node::*,
    monitor::GrowthMonitor,
    builder::{DEFAULT_MIN_DEPTH, DEFAULT_INFO_THRESHOLD},
    decision_tree_classifier::DecisionTreeClassifier,
};


use std::fmt;
use std::collections::BTreeMap;


/// The C4.5-style Decision Tree algorithm.
/// Given a labeled sample and a subset of its rows,
/// [`DecisionTree`] outputs a decision tree classifier
/// named [`DecisionTreeClassifier`]
/// under the specified parameters.
///
/// A node is split on the attribute with the largest information gain.
/// Categorical attributes get one branch per observed value,
/// numeric attributes a binary `≤`/`>` split at the best observed value.
/// A node becomes a leaf predicting the most frequent label
/// (ties: the lexicographically smallest) when
/// - its rows share one label,
/// - the maximal depth is reached,
/// - there is no attribute to split on,
/// - its depth is at least `min_depth` and
///   the gain is below `info_threshold`, or
/// - the best split leaves a branch empty.
///
/// [`DecisionTree`] is constructed
/// by [`DecisionTreeBuilder`](crate::weak_learner::DecisionTreeBuilder).
///
/// # Example
/// ```no_run
/// use miniforest::prelude::*;
///
/// // Read the training data from the CSV file.
/// let file = "/path/to/data/file.csv";
/// let sample = SampleReader::new()
///     .file(file)
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
///
///
/// // Get an instance of decision tree weak learner.
/// let tree = DecisionTreeBuilder::new()
///     .min_depth(2)
///     .info_threshold(0.05)
///     .build()
///     .unwrap();
///
/// let f = tree.produce(&sample, &sample.indices()).unwrap();
///
/// let accuracy = f.accuracy(&sample, &sample.indices()).unwrap();
/// println!("accuracy (train) is: {accuracy}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionTree {
    min_depth: usize,
    info_threshold: f64,
    max_depth: Option<usize>,
}


impl DecisionTree {
    /// Initialize [`DecisionTree`].
    /// This method is called only via `DecisionTreeBuilder::build`.
    #[inline]
    pub(super) fn from_components(
        min_depth: usize,
        info_threshold: f64,
        max_depth: Option<usize>,
    ) -> Self
    {
        Self { min_depth, info_threshold, max_depth, }
    }


    /// Returns the depth before which weak splits are still taken.
    pub fn min_depth(&self) -> usize {
        self.min_depth
    }


    /// Returns the smallest accepted information gain.
    pub fn info_threshold(&self) -> f64 {
        self.info_threshold
    }


    /// Returns the depth cap, if any.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }


    /// Like [`WeakLearner::produce`],
    /// but reports every split and leaf to `monitor`.
    pub fn produce_with_monitor<M>(
        &self,
        sample: &Sample,
        indices: &[usize],
        monitor: &mut M,
    ) -> Result<DecisionTreeClassifier, C45Error>
        where M: GrowthMonitor
    {
        let target = sample.labels()?;
        sample.check_indices(indices)?;

        let root = self.grow(sample, target, indices, 0, monitor)?
            .ok_or(C45Error::EmptyDataset)?;

        Ok(DecisionTreeClassifier::from(root))
    }


    /// Grows the subtree for the rows `indices` at depth `level`.
    /// Returns `None` for an empty subset;
    /// the parent then becomes a leaf.
    fn grow<M>(
        &self,
        sample: &Sample,
        target: &[String],
        indices: &[usize],
        level: usize,
        monitor: &mut M,
    ) -> Result<Option<TreeNode>, C45Error>
        where M: GrowthMonitor
    {
        let Some(mode) = mode_label(indices.iter().map(|&i| target[i].as_str()))
        else {
            return Ok(None);
        };
        let leaf = |monitor: &mut M| -> Result<Option<TreeNode>, C45Error> {
            monitor.on_leaf(level, mode);
            Ok(Some(TreeNode::leaf(mode)))
        };


        let reached_max_depth = self.max_depth
            .is_some_and(|depth| level >= depth);
        if is_pure(target, indices) || reached_max_depth {
            return leaf(monitor);
        }


        // Find the attribute (and threshold) with the largest gain.
        let Some(split) = best_split(sample, indices)? else {
            return leaf(monitor);
        };
        if level >= self.min_depth && split.gain < self.info_threshold {
            return leaf(monitor);
        }


        match &split.rule {
            SplitRule::Numeric { attribute, threshold } => {
                let (lessereq, greater) = partition_numeric(
                    sample, indices, attribute, *threshold
                )?;
                // If the split has no meaning, construct a leaf node.
                if lessereq.is_empty() || greater.is_empty() {
                    return leaf(monitor);
                }
                monitor.on_split(level, &split);

                let ltree = self.grow(sample, target, &lessereq, level + 1, monitor)?;
                let gtree = self.grow(sample, target, &greater, level + 1, monitor)?;
                let (Some(ltree), Some(gtree)) = (ltree, gtree) else {
                    return leaf(monitor);
                };
                Ok(Some(TreeNode::numeric(attribute, *threshold, ltree, gtree)))
            },
            SplitRule::Categorical { attribute } => {
                let groups = partition_categorical(sample, indices, attribute)?;
                if groups.len() < 2 {
                    return leaf(monitor);
                }
                monitor.on_split(level, &split);

                let mut children = BTreeMap::new();
                for (value, rows) in groups {
                    let Some(child) = self.grow(sample, target, &rows, level + 1, monitor)?
                    else {
                        return leaf(monitor);
                    };
                    children.insert(value.to_string(), child);
                }
                Ok(Some(TreeNode::categorical(attribute, children)))
            },
        }
    }
}


impl Default for DecisionTree {
    fn default() -> Self {
        Self::from_components(DEFAULT_MIN_DEPTH, DEFAULT_INFO_THRESHOLD, None)
    }
}


impl WeakLearner for DecisionTree {
    type Hypothesis = DecisionTreeClassifier;


    fn name(&self) -> &str {
        "Decision Tree (C4.5)"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let max_depth = self.max_depth
            .map(|depth| depth.to_string())
            .unwrap_or_else(|| "unbounded".to_string());
        let info = Vec::from([
            ("Min depth", format!("{}", self.min_depth)),
            ("Info threshold", format!("{}", self.info_threshold)),
            ("Max depth", max_depth),
        ]);
        Some(info)
    }


    #[inline]
    fn produce(&self, sample: &Sample, indices: &[usize])
        -> Result<Self::Hypothesis, C45Error>
    {
        self.produce_with_monitor(sample, indices, &mut ())
    }
}


/// Grows a tree on every row of `sample`.
///
/// Nodes shallower than `min_depth` are always split (if they can be);
/// deeper nodes become leaves when the gain is below `info_threshold`.
pub fn build_tree(sample: &Sample, min_depth: usize, info_threshold: f64)
    -> Result<DecisionTreeClassifier, C45Error>
{
    let dtree = super::DecisionTreeBuilder::new()
        .min_depth(min_depth)
        .info_threshold(info_threshold)
        .build()?;
    dtree.produce(sample, &sample.indices())
}


impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "\
            ----------\n\
            # Decision Tree Weak Learner\n\n\
            - Min depth: {}\n\
            - Info threshold: {}\
            ",
            self.min_depth,
            self.info_threshold,
        )?;
        match self.max_depth {
            Some(depth) => writeln!(f, "- Max depth: {depth}")?,
            None => writeln!(f, "- Max depth: unbounded")?,
        }
        write!(f, "----------")
    }
}
