use std::collections::BTreeMap;

use crate::{Sample, DecisionTreeClassifier, C45Error};
use crate::common::utils::subset_mode;
use crate::weak_learner::decision_tree::{
    Node,
    NodeIndex,
    TreeNode,
    partition_numeric,
    partition_categorical,
    entropy::{subset_entropy, attribute_entropy, num_attribute_entropy},
};


/// Rebuilds a tree, cutting the splits with a small gain.
pub(super) struct InformationGainPruner<'a> {
    tree: &'a DecisionTreeClassifier,
    sample: &'a Sample,
    threshold: f64,
}


impl<'a> InformationGainPruner<'a> {
    pub(super) fn new(
        tree: &'a DecisionTreeClassifier,
        sample: &'a Sample,
        threshold: f64,
    ) -> Self
    {
        Self { tree, sample, threshold }
    }


    pub(super) fn run(&self, reference: &[usize])
        -> Result<TreeNode, C45Error>
    {
        self.rebuild(NodeIndex::ROOT, reference)
    }


    fn rebuild(&self, index: NodeIndex, subset: &[usize])
        -> Result<TreeNode, C45Error>
    {
        let node = self.tree.node(index)?;
        if let Node::Leaf { label } = node {
            return Ok(TreeNode::leaf(label));
        }
        if let Some(label) = self.tree.uniform_children_label(index)? {
            return Ok(TreeNode::leaf(label));
        }

        let mode = subset_mode(self.sample, subset)?;
        let whole = subset_entropy(self.sample, subset)?;

        match node {
            Node::Leaf { label } => Ok(TreeNode::leaf(label)),
            Node::Numeric { attribute, threshold, lessereq, greater } => {
                let entropy = num_attribute_entropy(
                    self.sample, subset, attribute, *threshold
                )?;
                if whole - entropy < self.threshold {
                    return Ok(TreeNode::leaf(mode));
                }

                let (lrows, grows) = partition_numeric(
                    self.sample, subset, attribute, *threshold
                )?;
                if lrows.is_empty() || grows.is_empty() {
                    return Ok(TreeNode::leaf(mode));
                }
                Ok(TreeNode::numeric(
                    attribute,
                    *threshold,
                    self.rebuild(*lessereq, &lrows)?,
                    self.rebuild(*greater, &grows)?,
                ))
            },
            Node::Categorical { attribute, children } => {
                let entropy = attribute_entropy(
                    self.sample, subset, attribute
                )?;
                if whole - entropy < self.threshold {
                    return Ok(TreeNode::leaf(mode));
                }

                let groups = partition_categorical(
                    self.sample, subset, attribute
                )?;
                let mut rebuilt = BTreeMap::new();
                for (value, &child) in children {
                    // One of the children is empty.
                    let Some(rows) = groups.get(value.as_str()) else {
                        return Ok(TreeNode::leaf(mode));
                    };
                    rebuilt.insert(value.clone(), self.rebuild(child, rows)?);
                }
                Ok(TreeNode::categorical(attribute, rebuilt))
            },
        }
    }
}
