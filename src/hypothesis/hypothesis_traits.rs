use crate::{Sample, Record, C45Error};


/// A trait that defines the behavor of classifier.
/// You only need to implement `classify` method.
pub trait Classifier {
    /// Routes `point` to a class label.
    fn classify<R>(&self, point: &R) -> Result<&str, C45Error>
        where R: Record + ?Sized;


    /// Predicts the label of the `row`-th example of `sample`.
    fn predict(&self, sample: &Sample, row: usize) -> Result<&str, C45Error> {
        let row = sample.row(row)?;
        self.classify(&row)
    }


    /// Predicts the labels of `sample`.
    /// Rows that cannot be classified yield `None`.
    fn predict_all(&self, sample: &Sample) -> Vec<Option<&str>> {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.predict(sample, row).ok())
            .collect::<Vec<_>>()
    }


    /// Returns the fraction of the rows `indices` of `sample`
    /// whose prediction matches the label.
    /// A row that cannot be classified counts as wrong.
    fn accuracy(&self, sample: &Sample, indices: &[usize])
        -> Result<f64, C45Error>
    {
        if indices.is_empty() {
            return Err(C45Error::EmptyDataset);
        }
        let target = sample.labels()?;
        sample.check_indices(indices)?;

        let n_correct = indices.iter()
            .filter(|&&i| {
                self.predict(sample, i)
                    .is_ok_and(|label| label == target[i])
            })
            .count();
        Ok(n_correct as f64 / indices.len() as f64)
    }
}
