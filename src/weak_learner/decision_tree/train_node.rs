//! Defines the nested representation of a decision tree.
//! Trees are grown in this form, and it is also
//! the serde interchange shape:
//!
//! - leaf: `{"label": ...}`
//! - categorical split: `{"attribute": ..., "children": {value: node, ...}}`
//! - numeric split: `{"attribute": ..., "threshold": ...,
//!   "children": {"lessereq": node, "greater": node}}`
use serde::{Serialize, Deserialize, Deserializer};
use serde::de;

use std::collections::BTreeMap;

use crate::C45Error;


/// A decision tree node that owns its children.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// A node that predicts `label`.
    Leaf {
        /// The predicted class.
        label: String,
    },


    /// A numeric split.
    Numeric {
        /// The split attribute.
        attribute: String,
        /// The threshold.
        threshold: f64,
        /// The two children.
        children: NumericChildren,
    },


    /// A categorical split.
    Categorical {
        /// The split attribute.
        attribute: String,
        /// The child for each category.
        children: BTreeMap<String, TreeNode>,
    },
}


/// The children of a numeric split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericChildren {
    /// The child for `attribute ≤ threshold`.
    pub lessereq: Box<TreeNode>,
    /// The child for `attribute > threshold`.
    pub greater: Box<TreeNode>,
}


impl TreeNode {
    /// Construct a leaf that predicts `label`.
    #[inline]
    pub fn leaf<S: ToString>(label: S) -> Self {
        Self::Leaf { label: label.to_string() }
    }


    /// Construct a numeric split.
    #[inline]
    pub fn numeric<S: ToString>(
        attribute: S,
        threshold: f64,
        lessereq: TreeNode,
        greater: TreeNode,
    ) -> Self
    {
        Self::Numeric {
            attribute: attribute.to_string(),
            threshold,
            children: NumericChildren {
                lessereq: Box::new(lessereq),
                greater: Box::new(greater),
            },
        }
    }


    /// Construct a categorical split.
    #[inline]
    pub fn categorical<S: ToString>(
        attribute: S,
        children: BTreeMap<String, TreeNode>,
    ) -> Self
    {
        Self::Categorical { attribute: attribute.to_string(), children }
    }


    /// Returns the label of a leaf.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Leaf { label } => Some(label),
            _ => None,
        }
    }
}


/// A node as it appears in the interchange form,
/// before its structure is validated.
#[derive(Debug, Deserialize)]
pub(crate) struct RawNode {
    label: Option<String>,
    attribute: Option<String>,
    threshold: Option<f64>,
    children: Option<BTreeMap<String, RawNode>>,
}


fn invalid<S: ToString>(reason: S) -> C45Error {
    C45Error::InvalidTreeStructure { reason: reason.to_string() }
}


impl TryFrom<RawNode> for TreeNode {
    type Error = C45Error;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let RawNode { label, attribute, threshold, children } = raw;

        match (label, attribute) {
            (Some(label), None) => {
                if threshold.is_some() || children.is_some() {
                    return Err(invalid(format!(
                        "leaf `{label}` carries a threshold or children"
                    )));
                }
                Ok(Self::Leaf { label })
            },
            (Some(_), Some(attribute)) => Err(invalid(format!(
                "split on `{attribute}` also carries a label"
            ))),
            (None, None) => Err(invalid(
                "node has neither a label nor an attribute"
            )),
            (None, Some(attribute)) => {
                let mut children = children.ok_or_else(|| invalid(format!(
                    "split on `{attribute}` has no children"
                )))?;

                match threshold {
                    Some(threshold) => {
                        if !threshold.is_finite() {
                            return Err(invalid(format!(
                                "split on `{attribute}` has a non-finite threshold"
                            )));
                        }
                        let lessereq = children.remove("lessereq");
                        let greater = children.remove("greater");
                        let (Some(lessereq), Some(greater)) = (lessereq, greater) else {
                            return Err(invalid(format!(
                                "numeric split on `{attribute}` needs \
                                 both `lessereq` and `greater` children"
                            )));
                        };
                        if let Some(key) = children.keys().next() {
                            return Err(invalid(format!(
                                "numeric split on `{attribute}` has \
                                 an unexpected child `{key}`"
                            )));
                        }
                        Ok(Self::numeric(
                            attribute,
                            threshold,
                            Self::try_from(lessereq)?,
                            Self::try_from(greater)?,
                        ))
                    },
                    None => {
                        if children.is_empty() {
                            return Err(invalid(format!(
                                "categorical split on `{attribute}` \
                                 has no children"
                            )));
                        }
                        let children = children.into_iter()
                            .map(|(value, child)| {
                                Ok((value, Self::try_from(child)?))
                            })
                            .collect::<Result<BTreeMap<_, _>, C45Error>>()?;
                        Ok(Self::Categorical { attribute, children })
                    },
                }
            },
        }
    }
}


impl<'de> Deserialize<'de> for TreeNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de>
    {
        let raw = RawNode::deserialize(deserializer)?;
        Self::try_from(raw).map_err(de::Error::custom)
    }
}
