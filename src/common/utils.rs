//! This file provides some common functions
//! such as label counting and the mode label.
use std::collections::BTreeMap;

use crate::{Sample, C45Error};


/// Counts the occurrences of each label.
/// The map is ordered, so any sum over it
/// is taken in a fixed label order.
pub fn label_counts<'a, I>(labels: I) -> BTreeMap<&'a str, usize>
    where I: IntoIterator<Item = &'a str>,
{
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0_usize) += 1;
    }
    counts
}


/// Returns the most frequent label.
/// Ties are broken by the lexicographically smallest label.
/// Returns `None` for an empty input.
pub fn mode_label<'a, I>(labels: I) -> Option<&'a str>
    where I: IntoIterator<Item = &'a str>,
{
    let counts = label_counts(labels);
    // `max_by_key` returns the last maximum,
    // so walk the labels in descending order.
    counts.into_iter()
        .rev()
        .max_by_key(|&(_, count)| count)
        .map(|(label, _)| label)
}


/// Returns the mode label of the rows `indices` of `sample`.
pub(crate) fn subset_mode<'a>(sample: &'a Sample, indices: &[usize])
    -> Result<&'a str, C45Error>
{
    let target = sample.labels()?;
    mode_label(indices.iter().map(|&i| target[i].as_str()))
        .ok_or(C45Error::EmptyDataset)
}


/// Returns `true` if the rows `indices` of `sample` share one label.
pub(crate) fn is_pure(target: &[String], indices: &[usize]) -> bool {
    match indices.split_first() {
        Some((&first, rest)) => {
            rest.iter().all(|&i| target[i] == target[first])
        },
        None => true,
    }
}
