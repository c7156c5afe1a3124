//! Entropy and information-gain computations.
//!
//! All functions take the rows of interest as an index list,
//! so a bootstrap subset (with repeated rows) is handled
//! exactly like a plain subset.
use std::collections::BTreeMap;

use crate::{Sample, C45Error};
use crate::common::utils::label_counts;


/// Shannon entropy (base 2) of a label histogram.
/// Zero counts are skipped.
pub(crate) fn entropy_of_counts(counts: &BTreeMap<&str, usize>) -> f64 {
    let total = counts.values().sum::<usize>() as f64;
    counts.values()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum::<f64>()
}


/// Returns `-Σ p·log2(p)` over the label frequencies of `labels`.
/// A single class has entropy `0`.
pub fn set_entropy<'a, I>(labels: I) -> Result<f64, C45Error>
    where I: IntoIterator<Item = &'a str>,
{
    let counts = label_counts(labels);
    if counts.is_empty() {
        return Err(C45Error::EmptyDataset);
    }
    Ok(entropy_of_counts(&counts))
}


/// Returns the entropy of the labels of the rows `indices`.
pub fn subset_entropy(sample: &Sample, indices: &[usize])
    -> Result<f64, C45Error>
{
    let target = sample.labels()?;
    set_entropy(indices.iter().map(|&i| target[i].as_str()))
}


/// Returns the size-weighted average entropy of the partitions
/// induced by the distinct values of the categorical `attribute`.
pub fn attribute_entropy(
    sample: &Sample,
    indices: &[usize],
    attribute: &str,
) -> Result<f64, C45Error>
{
    let column = sample.categorical_column(attribute)?;
    let target = sample.labels()?;
    if indices.is_empty() {
        return Err(C45Error::EmptyDataset);
    }

    let mut groups: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
    for &i in indices {
        let counts = groups.entry(column[i].as_str()).or_default();
        *counts.entry(target[i].as_str()).or_insert(0) += 1;
    }

    let n_sample = indices.len() as f64;
    let entropy = groups.values()
        .map(|counts| {
            let size = counts.values().sum::<usize>() as f64;
            (size / n_sample) * entropy_of_counts(counts)
        })
        .sum::<f64>();
    Ok(entropy)
}


/// Returns the entropy of the numeric `attribute`
/// split at `threshold` (`≤` vs `>`).
/// If either side is empty, the whole-set entropy is returned.
pub fn num_attribute_entropy(
    sample: &Sample,
    indices: &[usize],
    attribute: &str,
    threshold: f64,
) -> Result<f64, C45Error>
{
    let column = sample.numeric_column(attribute)?;
    let target = sample.labels()?;
    if indices.is_empty() {
        return Err(C45Error::EmptyDataset);
    }

    let mut left = BTreeMap::new();
    let mut right = BTreeMap::new();
    for &i in indices {
        let side = if column[i] <= threshold { &mut left } else { &mut right };
        *side.entry(target[i].as_str()).or_insert(0_usize) += 1;
    }

    if left.is_empty() || right.is_empty() {
        return subset_entropy(sample, indices);
    }
    Ok(weighted_entropy(&left, &right, indices.len()))
}


/// Searches every distinct value of the numeric `attribute`
/// (among the rows `indices`) as a threshold and returns the pair
/// `(entropy, threshold)` with the smallest entropy.
/// Ties go to the smallest threshold.
///
/// The rows are sorted once and the label counts move from the right
/// partition to the left one, which gives the same values as evaluating
/// [`num_attribute_entropy`] at every threshold.
pub fn minimum_num_attribute_entropy(
    sample: &Sample,
    indices: &[usize],
    attribute: &str,
) -> Result<(f64, f64), C45Error>
{
    let column = sample.numeric_column(attribute)?;
    let target = sample.labels()?;
    if indices.is_empty() {
        return Err(C45Error::EmptyDataset);
    }

    let mut pairs = indices.iter()
        .map(|&i| (column[i], target[i].as_str()))
        .collect::<Vec<_>>();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));


    let mut right = label_counts(pairs.iter().map(|&(_, y)| y));
    let mut left = BTreeMap::new();
    let whole = entropy_of_counts(&right);
    let n_sample = pairs.len();


    let mut best: Option<(f64, f64)> = None;
    let mut k = 0;
    while k < n_sample {
        let threshold = pairs[k].0;
        while k < n_sample && pairs[k].0 == threshold {
            let y = pairs[k].1;
            *left.entry(y).or_insert(0_usize) += 1;
            if let Some(count) = right.get_mut(y) {
                *count -= 1;
                if *count == 0 {
                    right.remove(y);
                }
            }
            k += 1;
        }

        let entropy = if right.is_empty() {
            whole
        } else {
            weighted_entropy(&left, &right, n_sample)
        };

        if best.map_or(true, |(e, _)| entropy < e) {
            best = Some((entropy, threshold));
        }
    }

    best.ok_or(C45Error::EmptyDataset)
}


fn weighted_entropy(
    left: &BTreeMap<&str, usize>,
    right: &BTreeMap<&str, usize>,
    n_sample: usize,
) -> f64
{
    let n_sample = n_sample as f64;
    let n_left = left.values().sum::<usize>() as f64;
    let n_right = right.values().sum::<usize>() as f64;

    (n_left / n_sample) * entropy_of_counts(left)
        + (n_right / n_sample) * entropy_of_counts(right)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Feature;

    const TOLERANCE: f64 = 1e-12;

    fn toy() -> Sample {
        Sample::from_features(vec![
            Feature::numeric("x", [-3.0, -1.0, 0.0, 1.0, 2.0, 4.0, 0.0]),
            Feature::categorical("shade", ["dark", "light", "dark", "dark", "light", "light", "dark"]),
            Feature::categorical("class", ["red", "red", "red", "orange", "orange", "orange", "red"]),
        ]).unwrap()
            .set_target("class")
            .unwrap()
    }


    #[test]
    fn set_entropy_bounds() {
        assert_eq!(set_entropy(["a", "a", "a"]).unwrap(), 0.0);
        let h = set_entropy(["a", "b", "a", "b"]).unwrap();
        assert!((h - 1.0).abs() < TOLERANCE);
        let h = set_entropy(["a", "b", "c", "d"]).unwrap();
        assert!((h - 2.0).abs() < TOLERANCE);
        assert!(matches!(
            set_entropy(std::iter::empty()),
            Err(C45Error::EmptyDataset)
        ));
    }


    #[test]
    fn attribute_entropy_is_bounded_by_the_whole() {
        let sample = toy();
        let indices = sample.indices();
        let whole = subset_entropy(&sample, &indices).unwrap();
        let h = attribute_entropy(&sample, &indices, "shade").unwrap();
        assert!((0.0..=whole + TOLERANCE).contains(&h));

        assert!(matches!(
            attribute_entropy(&sample, &indices, "x"),
            Err(C45Error::AttributeTypeMismatch { .. })
        ));
    }


    #[test]
    fn numeric_entropy_with_an_empty_side_is_the_whole() {
        let sample = toy();
        let indices = sample.indices();
        let whole = subset_entropy(&sample, &indices).unwrap();
        let h = num_attribute_entropy(&sample, &indices, "x", 10.0).unwrap();
        assert_eq!(h, whole);
        let h = num_attribute_entropy(&sample, &indices, "x", 0.0).unwrap();
        assert_eq!(h, 0.0);
    }


    #[test]
    fn sweep_matches_brute_force() {
        let sample = toy();
        let indices = vec![0, 1, 3, 3, 4, 6, 2, 5];
        let (entropy, threshold) = minimum_num_attribute_entropy(
            &sample, &indices, "x"
        ).unwrap();

        let column = sample.numeric_column("x").unwrap();
        let mut values = indices.iter().map(|&i| column[i]).collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        values.dedup();
        let brute = values.into_iter()
            .map(|t| {
                let h = num_attribute_entropy(&sample, &indices, "x", t).unwrap();
                (h, t)
            })
            .fold(None, |best: Option<(f64, f64)>, (h, t)| {
                match best {
                    Some((bh, _)) if bh <= h => best,
                    _ => Some((h, t)),
                }
            })
            .unwrap();

        assert!((entropy - brute.0).abs() < TOLERANCE);
        assert_eq!(threshold, brute.1);
        assert_eq!(threshold, 0.0);
    }


    #[test]
    fn ties_go_to_the_smallest_threshold() {
        let sample = Sample::from_features(vec![
            Feature::numeric("x", [1.0, 2.0, 3.0]),
            Feature::categorical("class", ["a", "a", "a"]),
        ]).unwrap()
            .set_target("class")
            .unwrap();
        let (entropy, threshold) = minimum_num_attribute_entropy(
            &sample, &sample.indices(), "x"
        ).unwrap();
        assert_eq!(entropy, 0.0);
        assert_eq!(threshold, 1.0);
    }
}
