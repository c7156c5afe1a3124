//! This file defines some functions that checks some pre-conditions
//! E.g., a non-empty, labeled sample.

use crate::{Sample, C45Error};


/// Check whether the training sample is valid or not.
#[inline(always)]
pub(crate) fn check_sample(sample: &Sample) -> Result<(), C45Error> {
    sample.labels()?;

    // `data` and `target` must have the length greater than `0`.
    if sample.is_empty() {
        return Err(C45Error::EmptyDataset);
    }
    Ok(())
}


/// Check whether `value` is a finite, non-negative real.
#[inline(always)]
pub(crate) fn check_non_negative(parameter: &'static str, value: f64)
    -> Result<(), C45Error>
{
    if !value.is_finite() || value < 0.0 {
        return Err(C45Error::InvalidConfig {
            parameter,
            reason: format!("expected a finite value >= 0, got {value}"),
        });
    }
    Ok(())
}


/// Check whether `value` is a finite real.
#[inline(always)]
pub(crate) fn check_finite(parameter: &'static str, value: f64)
    -> Result<(), C45Error>
{
    if !value.is_finite() {
        return Err(C45Error::InvalidConfig {
            parameter,
            reason: format!("expected a finite value, got {value}"),
        });
    }
    Ok(())
}


/// Check whether `value` is at least `1`.
#[inline(always)]
pub(crate) fn check_positive(parameter: &'static str, value: usize)
    -> Result<(), C45Error>
{
    if value == 0 {
        return Err(C45Error::InvalidConfig {
            parameter,
            reason: "expected a value >= 1, got 0".into(),
        });
    }
    Ok(())
}
