use tracing::debug;

use crate::{Sample, Classifier, DecisionTreeClassifier, C45Error};
use crate::common::utils::subset_mode;
use crate::weak_learner::decision_tree::{
    Node,
    NodeIndex,
    partition_numeric,
    partition_categorical,
};


/// Top-down reduced-error pruning.
/// Every candidate substitution is scored on all reference rows.
pub(super) struct ReducedErrorPruner<'a> {
    tree: &'a mut DecisionTreeClassifier,
    sample: &'a Sample,
    reference: &'a [usize],
}


impl<'a> ReducedErrorPruner<'a> {
    pub(super) fn new(
        tree: &'a mut DecisionTreeClassifier,
        sample: &'a Sample,
        reference: &'a [usize],
    ) -> Self
    {
        Self { tree, sample, reference }
    }


    pub(super) fn run(mut self) -> Result<(), C45Error> {
        let reference = self.reference;
        self.visit(NodeIndex::ROOT, reference, true)
    }


    /// `subset` holds the reference rows that reach `index`.
    fn visit(&mut self, index: NodeIndex, subset: &[usize], is_root: bool)
        -> Result<(), C45Error>
    {
        if self.tree.node(index)?.is_leaf() {
            return Ok(());
        }

        if let Some(label) = self.tree.uniform_children_label(index)? {
            self.tree.replace(index, Node::leaf(label))?;
            return Ok(());
        }

        if !is_root {
            let mode = subset_mode(self.sample, subset)?;
            let before = self.tree.accuracy(self.sample, self.reference)?;
            let subtree = self.tree.replace(index, Node::leaf(mode))?;
            let after = self.tree.accuracy(self.sample, self.reference)?;

            if after > before {
                debug!(node = index.index(), before, after, "pruned subtree");
                return Ok(());
            }
            self.tree.replace(index, subtree)?;
        }

        self.descend(index, subset)
    }


    fn descend(&mut self, index: NodeIndex, subset: &[usize])
        -> Result<(), C45Error>
    {
        match self.tree.node(index)?.clone() {
            Node::Leaf { .. } => Ok(()),
            Node::Numeric { attribute, threshold, lessereq, greater } => {
                let (lrows, grows) = partition_numeric(
                    self.sample, subset, &attribute, threshold
                )?;
                self.visit_child(lessereq, &lrows, subset)?;
                self.visit_child(greater, &grows, subset)
            },
            Node::Categorical { attribute, children } => {
                let groups = partition_categorical(
                    self.sample, subset, &attribute
                )?;
                for (value, child) in children {
                    let rows = groups.get(value.as_str())
                        .map(|rows| &rows[..])
                        .unwrap_or(&[]);
                    self.visit_child(child, rows, subset)?;
                }
                Ok(())
            },
        }
    }


    /// A child that no reference row reaches
    /// becomes a leaf with the mode of its parent's rows.
    fn visit_child(
        &mut self,
        child: NodeIndex,
        rows: &[usize],
        parent_rows: &[usize],
    ) -> Result<(), C45Error>
    {
        if rows.is_empty() {
            let mode = subset_mode(self.sample, parent_rows)?;
            self.tree.replace(child, Node::leaf(mode))?;
            return Ok(());
        }
        self.visit(child, rows, false)
    }
}
