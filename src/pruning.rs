//! Simplifies a grown [`DecisionTreeClassifier`] against reference rows.
//!
//! Two methods are available through [`PruneMethod`]:
//! - [`PruneMethod::Score`] is reduced-error pruning.
//!   It rewrites the tree in place and keeps a substitution only
//!   when it strictly improves the accuracy on the reference rows,
//!   so the accuracy on those rows never drops.
//! - [`PruneMethod::Entropy`] rebuilds the tree, turning every node
//!   whose own split gains less than `threshold` bits into a leaf.
//!
//! Both methods merge a split whose children are leaves
//! with one common label into that leaf.

mod reduced_error;
mod information_gain;

use crate::{Sample, DecisionTreeClassifier, C45Error};
use crate::common::checker;

use reduced_error::ReducedErrorPruner;
use information_gain::InformationGainPruner;


/// The default gain threshold of [`PruneMethod::Entropy`].
pub const DEFAULT_ENTROPY_THRESHOLD: f64 = 1.0;


/// The pruning strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PruneMethod {
    /// Reduced-error pruning, in place.
    Score,
    /// Information-gain pruning.
    Entropy {
        /// Splits whose gain on their reference rows is below
        /// this value become leaves.
        threshold: f64,
    },
}


impl Default for PruneMethod {
    fn default() -> Self {
        Self::Entropy { threshold: DEFAULT_ENTROPY_THRESHOLD }
    }
}


impl DecisionTreeClassifier {
    /// Prunes this tree against the rows `indices` of `sample`.
    /// See [`PruneMethod`] for the strategies.
    /// The node table is compacted afterwards.
    pub fn prune(
        &mut self,
        sample: &Sample,
        indices: &[usize],
        method: PruneMethod,
    ) -> Result<(), C45Error>
    {
        if indices.is_empty() {
            return Err(C45Error::EmptyDataset);
        }
        sample.labels()?;
        sample.check_indices(indices)?;

        match method {
            PruneMethod::Score => {
                ReducedErrorPruner::new(self, sample, indices).run()?;
                self.compact()
            },
            PruneMethod::Entropy { threshold } => {
                checker::check_finite("threshold", threshold)?;
                let root = InformationGainPruner::new(self, sample, threshold)
                    .run(indices)?;
                *self = Self::from(root);
                Ok(())
            },
        }
    }
}


/// Consumes `tree`, prunes it against the rows `indices` of `sample`,
/// and returns it.
pub fn prune(
    mut tree: DecisionTreeClassifier,
    sample: &Sample,
    indices: &[usize],
    method: PruneMethod,
) -> Result<DecisionTreeClassifier, C45Error>
{
    tree.prune(sample, indices, method)?;
    Ok(tree)
}
