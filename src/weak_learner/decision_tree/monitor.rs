//! Hooks that observe tree growth.
use tracing::trace;

use super::criterion::BestSplit;


/// Receives every decision made while a tree grows.
/// Both methods default to no-ops.
pub trait GrowthMonitor {
    /// Called when a node at depth `level` is split by `split`.
    fn on_split(&mut self, level: usize, split: &BestSplit) {
        let _ = (level, split);
    }


    /// Called when a node at depth `level` becomes a leaf
    /// predicting `label`.
    fn on_leaf(&mut self, level: usize, label: &str) {
        let _ = (level, label);
    }
}


impl GrowthMonitor for () {}


/// A monitor that emits every decision as a `tracing` event
/// at the `TRACE` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceMonitor;


impl GrowthMonitor for TraceMonitor {
    fn on_split(&mut self, level: usize, split: &BestSplit) {
        trace!(level, rule = %split.rule, gain = split.gain, "split");
    }


    fn on_leaf(&mut self, level: usize, label: &str) {
        trace!(level, label, "leaf");
    }
}


/// Records every decision, mostly for tests and diagnostics.
#[derive(Debug, Clone, Default)]
pub struct RecordingMonitor {
    /// `(level, split)` for each split, in growth order.
    pub splits: Vec<(usize, BestSplit)>,
    /// `(level, label)` for each leaf, in growth order.
    pub leaves: Vec<(usize, String)>,
}


impl GrowthMonitor for RecordingMonitor {
    fn on_split(&mut self, level: usize, split: &BestSplit) {
        self.splits.push((level, split.clone()));
    }


    fn on_leaf(&mut self, level: usize, label: &str) {
        self.leaves.push((level, label.to_string()));
    }
}
