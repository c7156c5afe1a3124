use serde::{Serialize, Deserialize};


/// Statistics of one iteration of the forest loop.
///
/// `mean_score`, `max_score` and `min_score` summarize the accuracy
/// of every member on its own test subset, before elimination.
/// `ensemble_score` is the majority-vote accuracy of the forest
/// on the whole sample, after elimination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    /// One-based iteration number.
    pub iteration: usize,
    /// Mean member accuracy.
    pub mean_score: f64,
    /// Best member accuracy.
    pub max_score: f64,
    /// Worst member accuracy.
    pub min_score: f64,
    /// Accuracy of the forest on the whole sample.
    pub ensemble_score: f64,
    /// Number of slots emptied in this iteration.
    pub eliminated: usize,
}


impl IterationStats {
    /// Summarizes member `scores`.
    /// Returns `None` if `scores` is empty.
    pub(crate) fn summarize(
        iteration: usize,
        scores: &[f64],
        ensemble_score: f64,
        eliminated: usize,
    ) -> Option<Self>
    {
        if scores.is_empty() {
            return None;
        }
        let max_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_score = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let mean_score = scores.iter().sum::<f64>() / scores.len() as f64;

        Some(Self {
            iteration,
            mean_score,
            max_score,
            min_score,
            ensemble_score,
            eliminated,
        })
    }


    /// Returns this record as a CSV line (without the newline).
    pub(crate) fn to_csv(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.iteration,
            self.mean_score,
            self.max_score,
            self.min_score,
            self.ensemble_score,
            self.eliminated,
        )
    }
}
