//! Selects the attribute (and threshold) that maximizes
//! the information gain on a subset.
use rayon::prelude::*;

use crate::{Sample, Feature, C45Error};
use super::entropy::*;
use super::split_rule::SplitRule;


/// The winning rule of [`best_split`] and its information gain.
#[derive(Debug, Clone, PartialEq)]
pub struct BestSplit {
    /// The splitting rule.
    pub rule: SplitRule,
    /// Whole-subset entropy minus the entropy after the split.
    pub gain: f64,
}


/// Returns the split with the largest information gain
/// over all feature columns, or `None` if `sample` has no features.
/// Ties go to the first column in declared order.
pub fn best_split(sample: &Sample, indices: &[usize])
    -> Result<Option<BestSplit>, C45Error>
{
    let whole = subset_entropy(sample, indices)?;

    let candidates = sample.features()
        .par_iter()
        .map(|feature| {
            let attribute = feature.name().to_string();
            match feature {
                Feature::Categorical(_) => {
                    let entropy = attribute_entropy(
                        sample, indices, &attribute
                    )?;
                    Ok((SplitRule::Categorical { attribute }, entropy))
                },
                Feature::Numeric(_) => {
                    let (entropy, threshold) = minimum_num_attribute_entropy(
                        sample, indices, &attribute
                    )?;
                    Ok((SplitRule::Numeric { attribute, threshold }, entropy))
                },
            }
        })
        .collect::<Result<Vec<_>, C45Error>>()?;


    let mut best: Option<BestSplit> = None;
    for (rule, entropy) in candidates {
        let gain = whole - entropy;
        if best.as_ref().map_or(true, |b| gain > b.gain) {
            best = Some(BestSplit { rule, gain });
        }
    }
    Ok(best)
}
