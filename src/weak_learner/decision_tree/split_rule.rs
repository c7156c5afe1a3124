//! This file defines split rules for decision tree.
use std::collections::BTreeMap;
use std::fmt;

use crate::{Sample, C45Error, AttributeKind};


/// A rule that partitions the rows reaching a node.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitRule {
    /// One branch per distinct value of `attribute`.
    Categorical {
        /// The split attribute.
        attribute: String,
    },
    /// `attribute ≤ threshold` vs `attribute > threshold`.
    Numeric {
        /// The split attribute.
        attribute: String,
        /// The threshold.
        threshold: f64,
    },
}


impl SplitRule {
    /// Returns the split attribute.
    pub fn attribute(&self) -> &str {
        match self {
            Self::Categorical { attribute } => attribute,
            Self::Numeric { attribute, .. } => attribute,
        }
    }


    /// Returns the kind of the split attribute.
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Categorical { .. } => AttributeKind::Categorical,
            Self::Numeric { .. } => AttributeKind::Numeric,
        }
    }
}


/// Splits `indices` into the rows with `attribute ≤ threshold`
/// and the rest. The order of `indices` is kept on both sides.
pub(crate) fn partition_numeric(
    sample: &Sample,
    indices: &[usize],
    attribute: &str,
    threshold: f64,
) -> Result<(Vec<usize>, Vec<usize>), C45Error>
{
    let column = sample.numeric_column(attribute)?;
    let mut lessereq = Vec::new();
    let mut greater = Vec::new();
    for &i in indices {
        if column[i] <= threshold {
            lessereq.push(i);
        } else {
            greater.push(i);
        }
    }
    Ok((lessereq, greater))
}


/// Groups `indices` by the value of the categorical `attribute`.
/// The groups are ordered by value.
pub(crate) fn partition_categorical<'a>(
    sample: &'a Sample,
    indices: &[usize],
    attribute: &str,
) -> Result<BTreeMap<&'a str, Vec<usize>>, C45Error>
{
    let column = sample.categorical_column(attribute)?;
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for &i in indices {
        groups.entry(column[i].as_str()).or_default().push(i);
    }
    Ok(groups)
}


impl fmt::Display for SplitRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categorical { attribute } => write!(f, "{attribute} = ?"),
            Self::Numeric { attribute, threshold } => {
                write!(f, "{attribute} <= {threshold}")
            },
        }
    }
}
