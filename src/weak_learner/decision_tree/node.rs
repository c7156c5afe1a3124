//! Defines the inner representation
//! of the Decision Tree class.
use std::collections::BTreeMap;
use std::fmt;


/// Position of a node in the node table of a
/// [`DecisionTreeClassifier`](super::DecisionTreeClassifier).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub(crate) usize);


impl NodeIndex {
    /// The root always lives at index `0`.
    pub const ROOT: Self = Self(0);


    /// Returns the raw index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }
}


impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}


/// A node of a decision tree.
/// Children are referenced through [`NodeIndex`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A node that predicts `label`.
    Leaf {
        /// The predicted class.
        label: String,
    },


    /// A node with one child per category observed while training.
    Categorical {
        /// The split attribute.
        attribute: String,
        /// The child for each category.
        children: BTreeMap<String, NodeIndex>,
    },


    /// A node that routes `attribute ≤ threshold` to `lessereq`
    /// and the rest to `greater`.
    Numeric {
        /// The split attribute.
        attribute: String,
        /// The threshold.
        threshold: f64,
        /// The child for `attribute ≤ threshold`.
        lessereq: NodeIndex,
        /// The child for `attribute > threshold`.
        greater: NodeIndex,
    },
}


impl Node {
    /// Construct a leaf that predicts `label`.
    #[inline]
    pub fn leaf<S: ToString>(label: S) -> Self {
        Self::Leaf { label: label.to_string() }
    }


    /// Returns `true` if this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }


    /// Returns the label of a leaf.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Leaf { label } => Some(label),
            _ => None,
        }
    }


    /// Returns the split attribute of an inner node.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::Leaf { .. } => None,
            Self::Categorical { attribute, .. } => Some(attribute),
            Self::Numeric { attribute, .. } => Some(attribute),
        }
    }


    /// Returns the children of this node.
    /// Numeric splits list `lessereq` first,
    /// categorical splits list children in category order.
    pub fn children(&self) -> Vec<NodeIndex> {
        match self {
            Self::Leaf { .. } => Vec::with_capacity(0),
            Self::Categorical { children, .. } => {
                children.values().copied().collect()
            },
            Self::Numeric { lessereq, greater, .. } => {
                vec![*lessereq, *greater]
            },
        }
    }


    pub(super) fn dot_label(&self) -> String {
        match self {
            Self::Leaf { label } => {
                format!("label = \"{}\", shape = box", dot_escape(label))
            },
            Self::Categorical { attribute, .. } => {
                format!("label = \"{} ?\"", dot_escape(attribute))
            },
            Self::Numeric { attribute, threshold, .. } => {
                format!(
                    "label = \"{} <= {threshold:.4} ?\"",
                    dot_escape(attribute)
                )
            },
        }
    }
}


/// Escapes `"` and `\` so that `text` fits in a quoted `.dot` id.
pub(super) fn dot_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_order() {
        let numeric = Node::Numeric {
            attribute: "x".into(),
            threshold: 0.5,
            lessereq: NodeIndex(2),
            greater: NodeIndex(1),
        };
        assert_eq!(numeric.children(), vec![NodeIndex(2), NodeIndex(1)]);

        let categorical = Node::Categorical {
            attribute: "colour".into(),
            children: BTreeMap::from([
                ("red".to_string(), NodeIndex(1)),
                ("green".to_string(), NodeIndex(2)),
            ]),
        };
        assert_eq!(categorical.children(), vec![NodeIndex(2), NodeIndex(1)]);
        assert_eq!(categorical.attribute(), Some("colour"));
        assert!(Node::leaf("a").children().is_empty());
        assert_eq!(Node::leaf("a").label(), Some("a"));
    }


    #[test]
    fn dot_labels_are_escaped() {
        assert_eq!(dot_escape(r#"5" disk"#), r#"5\" disk"#);
        assert_eq!(dot_escape(r"a\b"), r"a\\b");
        assert_eq!(
            Node::leaf(r#"say "hi""#).dot_label(),
            r#"label = "say \"hi\"", shape = box"#
        );
    }
}
