//! Provides the `WeakLearner` trait.
use crate::{Sample, Classifier, C45Error};


/// An interface for the tree learners.
/// A weak learner fits a [`Classifier`] on a subset of a sample.
pub trait WeakLearner {
    /// The hypothesis returned by [`WeakLearner::produce`].
    type Hypothesis: Classifier;


    /// Returns the name of this learner.
    fn name(&self) -> &str;


    /// Returns the parameters of this learner as `(name, value)` pairs.
    /// The default returns `None`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Fits a hypothesis on the rows `indices` of `sample`.
    /// `indices` may contain repeated rows.
    fn produce(&self, sample: &Sample, indices: &[usize])
        -> Result<Self::Hypothesis, C45Error>;
}
