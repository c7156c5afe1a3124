//! Defines the decision tree classifier.
use crate::{Classifier, Record, ValueRef, C45Error, AttributeKind};


use super::node::*;
use super::train_node::*;
use serde::{Serialize, Serializer, Deserialize, Deserializer};
use serde::ser;

use std::path::Path;
use std::fs::File;
use std::io::prelude::*;
use std::fmt;
use std::mem;


/// Decision tree classifier.
/// The nodes live in a table addressed by [`NodeIndex`],
/// the root at [`NodeIndex::ROOT`].
/// Serialization goes through the nested [`TreeNode`] form.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTreeClassifier {
    nodes: Vec<Node>,
}


impl From<TreeNode> for DecisionTreeClassifier {
    #[inline]
    fn from(root: TreeNode) -> Self {
        let mut nodes = Vec::new();
        flatten(&mut nodes, root);
        Self { nodes }
    }
}


/// Pushes `tree` in pre-order and returns the index of its root.
fn flatten(nodes: &mut Vec<Node>, tree: TreeNode) -> NodeIndex {
    let index = NodeIndex(nodes.len());
    match tree {
        TreeNode::Leaf { label } => {
            nodes.push(Node::Leaf { label });
        },
        TreeNode::Numeric { attribute, threshold, children } => {
            // Reserve the slot so that the parent precedes its children.
            nodes.push(Node::leaf(""));
            let lessereq = flatten(nodes, *children.lessereq);
            let greater = flatten(nodes, *children.greater);
            nodes[index.0] = Node::Numeric {
                attribute, threshold, lessereq, greater,
            };
        },
        TreeNode::Categorical { attribute, children } => {
            nodes.push(Node::leaf(""));
            let children = children.into_iter()
                .map(|(value, child)| (value, flatten(nodes, child)))
                .collect();
            nodes[index.0] = Node::Categorical { attribute, children };
        },
    }
    index
}


impl DecisionTreeClassifier {
    /// Returns the node at `index`.
    pub fn node(&self, index: NodeIndex) -> Result<&Node, C45Error> {
        self.nodes.get(index.0)
            .ok_or_else(|| C45Error::InvalidTreeStructure {
                reason: format!("dangling node index {index}"),
            })
    }


    /// Returns the root node.
    pub fn root(&self) -> Result<&Node, C45Error> {
        self.node(NodeIndex::ROOT)
    }


    /// Returns the node table.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes[..]
    }


    /// Returns the number of nodes.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }


    /// Returns the number of split (inner) nodes.
    pub fn n_splits(&self) -> usize {
        self.nodes.iter()
            .filter(|node| !node.is_leaf())
            .count()
    }


    /// Returns the number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter()
            .filter(|node| node.is_leaf())
            .count()
    }


    /// Returns the depth of the tree.
    /// A tree made of a single leaf has depth `0`.
    pub fn depth(&self) -> Result<usize, C45Error> {
        let mut depth = 0;
        let mut stack = vec![(NodeIndex::ROOT, 0_usize)];
        while let Some((index, level)) = stack.pop() {
            if level > self.nodes.len() {
                return Err(cycle());
            }
            depth = depth.max(level);
            let children = self.node(index)?.children();
            stack.extend(children.into_iter().map(|child| (child, level + 1)));
        }
        Ok(depth)
    }


    /// Converts the node table into the nested form.
    pub fn to_tree_node(&self) -> Result<TreeNode, C45Error> {
        self.subtree(NodeIndex::ROOT, 0)
    }


    fn subtree(&self, index: NodeIndex, level: usize)
        -> Result<TreeNode, C45Error>
    {
        if level > self.nodes.len() {
            return Err(cycle());
        }
        let tree = match self.node(index)? {
            Node::Leaf { label } => TreeNode::leaf(label),
            Node::Numeric { attribute, threshold, lessereq, greater } => {
                TreeNode::numeric(
                    attribute,
                    *threshold,
                    self.subtree(*lessereq, level + 1)?,
                    self.subtree(*greater, level + 1)?,
                )
            },
            Node::Categorical { attribute, children } => {
                let children = children.iter()
                    .map(|(value, &child)| {
                        Ok((value.clone(), self.subtree(child, level + 1)?))
                    })
                    .collect::<Result<_, C45Error>>()?;
                TreeNode::categorical(attribute, children)
            },
        };
        Ok(tree)
    }


    /// Writes `node` into the slot `index`
    /// and returns the node it replaces.
    pub(crate) fn replace(&mut self, index: NodeIndex, node: Node)
        -> Result<Node, C45Error>
    {
        let slot = self.nodes.get_mut(index.0)
            .ok_or_else(|| C45Error::InvalidTreeStructure {
                reason: format!("dangling node index {index}"),
            })?;
        Ok(mem::replace(slot, node))
    }


    /// If every child of the split at `index` is a leaf
    /// and they all predict the same label, returns that label.
    pub(crate) fn uniform_children_label(&self, index: NodeIndex)
        -> Result<Option<String>, C45Error>
    {
        let children = self.node(index)?.children();
        let Some((&first, rest)) = children.split_first() else {
            return Ok(None);
        };
        let Some(label) = self.node(first)?.label() else {
            return Ok(None);
        };
        for &child in rest {
            if self.node(child)?.label() != Some(label) {
                return Ok(None);
            }
        }
        Ok(Some(label.to_string()))
    }


    /// Drops the slots that are no longer reachable from the root.
    pub(crate) fn compact(&mut self) -> Result<(), C45Error> {
        let root = self.to_tree_node()?;
        *self = Self::from(root);
        Ok(())
    }


    /// Parses a tree from its JSON interchange form.
    /// A structurally invalid tree is reported as
    /// [`C45Error::InvalidTreeStructure`].
    pub fn from_json(json: &str) -> Result<Self, C45Error> {
        let raw: RawNode = serde_json::from_str(json)?;
        let root = TreeNode::try_from(raw)?;
        Ok(Self::from(root))
    }


    /// Returns the JSON interchange form of this tree.
    pub fn to_json(&self) -> Result<String, C45Error> {
        let root = self.to_tree_node()?;
        Ok(serde_json::to_string(&root)?)
    }


    /// Write the current decision tree to dot file.
    #[inline]
    pub fn to_dot_file<P>(&self, path: P) -> Result<(), C45Error>
        where P: AsRef<Path>
    {
        let path = path.as_ref();
        let write_error = |source| C45Error::WriteFile {
            path: path.to_path_buf(),
            source,
        };
        let info = self.to_dot_info()?;

        let mut f = File::create(path).map_err(write_error)?;
        f.write_all(b"graph DecisionTree {\n").map_err(write_error)?;
        for row in info {
            f.write_all(row.as_bytes()).map_err(write_error)?;
        }
        f.write_all(b"}\n").map_err(write_error)?;

        Ok(())
    }


    fn to_dot_info(&self) -> Result<Vec<String>, C45Error> {
        let mut info = Vec::with_capacity(2 * self.nodes.len());
        for (id, node) in self.nodes.iter().enumerate() {
            info.push(format!("\tnode_{id} [ {} ];\n", node.dot_label()));
            match node {
                Node::Leaf { .. } => {},
                Node::Numeric { lessereq, greater, .. } => {
                    self.node(*lessereq)?;
                    self.node(*greater)?;
                    info.push(format!(
                        "\tnode_{id} -- node_{} [ label = \"Yes\" ];\n",
                        lessereq.0
                    ));
                    info.push(format!(
                        "\tnode_{id} -- node_{} [ label = \"No\" ];\n",
                        greater.0
                    ));
                },
                Node::Categorical { children, .. } => {
                    for (value, child) in children {
                        self.node(*child)?;
                        info.push(format!(
                            "\tnode_{id} -- node_{} [ label = \"{}\" ];\n",
                            child.0,
                            dot_escape(value),
                        ));
                    }
                },
            }
        }
        Ok(info)
    }


    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, index: NodeIndex, level: usize)
        -> fmt::Result
    {
        let indent = "\t".repeat(level);
        // A malformed table is rendered as far as it can be followed.
        let Some(node) = self.nodes.get(index.0) else {
            return writeln!(f, "{indent}<dangling node {index}>");
        };
        if level > self.nodes.len() {
            return writeln!(f, "{indent}<cycle>");
        }
        match node {
            Node::Leaf { label } => writeln!(f, "{indent}It's {label}"),
            Node::Numeric { attribute, threshold, lessereq, greater } => {
                let threshold = (threshold * 1e4).round() / 1e4;
                writeln!(f, "{indent}Split by \"{attribute}\" at {threshold}")?;
                writeln!(f, "{indent}If lesser than or equal to {threshold}:")?;
                self.fmt_node(f, *lessereq, level + 1)?;
                writeln!(f, "{indent}Otherwise ({attribute}>{threshold}):")?;
                self.fmt_node(f, *greater, level + 1)
            },
            Node::Categorical { attribute, children } => {
                writeln!(f, "{indent}Split by \"{attribute}\"")?;
                for (value, child) in children {
                    writeln!(f, "{indent}If equal to {value}:")?;
                    self.fmt_node(f, *child, level + 1)?;
                }
                Ok(())
            },
        }
    }
}


fn cycle() -> C45Error {
    C45Error::InvalidTreeStructure {
        reason: "the node table contains a cycle".into(),
    }
}


impl Classifier for DecisionTreeClassifier {
    fn classify<R>(&self, point: &R) -> Result<&str, C45Error>
        where R: Record + ?Sized
    {
        let mut index = NodeIndex::ROOT;
        // Any root-to-leaf path visits each slot at most once.
        for _ in 0..=self.nodes.len() {
            index = match self.node(index)? {
                Node::Leaf { label } => return Ok(label),
                Node::Numeric { attribute, threshold, lessereq, greater } => {
                    match point.value(attribute) {
                        Some(ValueRef::Numeric(value)) => {
                            if value <= *threshold { *lessereq } else { *greater }
                        },
                        Some(ValueRef::Categorical(_)) => {
                            return Err(C45Error::AttributeTypeMismatch {
                                attribute: attribute.clone(),
                                expected: AttributeKind::Numeric,
                            });
                        },
                        None => {
                            return Err(C45Error::UnknownCategory {
                                attribute: attribute.clone(),
                                value: None,
                            });
                        },
                    }
                },
                Node::Categorical { attribute, children } => {
                    match point.value(attribute) {
                        Some(ValueRef::Categorical(value)) => {
                            *children.get(value)
                                .ok_or_else(|| C45Error::UnknownCategory {
                                    attribute: attribute.clone(),
                                    value: Some(value.to_string()),
                                })?
                        },
                        Some(ValueRef::Numeric(_)) => {
                            return Err(C45Error::AttributeTypeMismatch {
                                attribute: attribute.clone(),
                                expected: AttributeKind::Categorical,
                            });
                        },
                        None => {
                            return Err(C45Error::UnknownCategory {
                                attribute: attribute.clone(),
                                value: None,
                            });
                        },
                    }
                },
            };
        }
        Err(cycle())
    }
}


impl fmt::Display for DecisionTreeClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, NodeIndex::ROOT, 0)
    }
}


impl Serialize for DecisionTreeClassifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        self.to_tree_node()
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}


impl<'de> Deserialize<'de> for DecisionTreeClassifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de>
    {
        TreeNode::deserialize(deserializer).map(Self::from)
    }
}
