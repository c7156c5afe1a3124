use polars::prelude::*;
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::C45Error;
use super::record::ValueRef;


/// The kind of values an attribute (column) takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Values drawn from a finite set of strings.
    Categorical,
    /// Finite real values.
    Numeric,
}


impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Categorical => write!(f, "categorical"),
            Self::Numeric => write!(f, "numeric"),
        }
    }
}


/// A numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericFeature {
    /// Feature name
    pub name: String,
    /// Feature values.
    pub sample: Vec<f64>,
}


/// A categorical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalFeature {
    /// Feature name
    pub name: String,
    /// Feature values.
    pub sample: Vec<String>,
}


/// An enumeration of numeric/categorical feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    /// A column of real values.
    Numeric(NumericFeature),
    /// A column of categories.
    Categorical(CategoricalFeature),
}


impl Feature {
    /// Construct a numeric feature from the given values.
    pub fn numeric<S, I>(name: S, values: I) -> Self
        where S: ToString,
              I: IntoIterator<Item = f64>,
    {
        Self::Numeric(NumericFeature {
            name: name.to_string(),
            sample: values.into_iter().collect(),
        })
    }


    /// Construct a categorical feature from the given values.
    pub fn categorical<S, I, T>(name: S, values: I) -> Self
        where S: ToString,
              I: IntoIterator<Item = T>,
              T: ToString,
    {
        Self::Categorical(CategoricalFeature {
            name: name.to_string(),
            sample: values.into_iter().map(|v| v.to_string()).collect(),
        })
    }


    /// Get the feature name.
    pub fn name(&self) -> &str {
        match self {
            Self::Numeric(feat) => &feat.name,
            Self::Categorical(feat) => &feat.name,
        }
    }


    /// Returns the kind of this feature.
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Numeric(_) => AttributeKind::Numeric,
            Self::Categorical(_) => AttributeKind::Categorical,
        }
    }


    /// Returns the number of items in this feature.
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(feat) => feat.sample.len(),
            Self::Categorical(feat) => feat.sample.len(),
        }
    }


    /// Returns `true` if the number of examples is equals to `0`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Returns the value at `row`, or `None` if `row` is out of bounds.
    pub fn value(&self, row: usize) -> Option<ValueRef<'_>> {
        match self {
            Self::Numeric(feat) => feat.sample.get(row)
                .copied()
                .map(ValueRef::Numeric),
            Self::Categorical(feat) => feat.sample.get(row)
                .map(|v| ValueRef::Categorical(v.as_str())),
        }
    }


    /// Consumes the feature and returns its values as class labels.
    /// Numeric values are converted to their textual form.
    pub(crate) fn into_labels(self) -> Vec<String> {
        match self {
            Self::Numeric(feat) => feat.sample.into_iter()
                .map(|v| v.to_string())
                .collect(),
            Self::Categorical(feat) => feat.sample,
        }
    }


    /// Returns the index of the first non-finite numeric value.
    pub(crate) fn first_non_finite(&self) -> Option<usize> {
        match self {
            Self::Numeric(feat) => feat.sample.iter()
                .position(|v| !v.is_finite()),
            Self::Categorical(_) => None,
        }
    }


    /// Convert a `polars::Series` into a `Feature`.
    /// Numeric dtypes become numeric features,
    /// every other dtype is read as text.
    pub(crate) fn from_series(series: &Series) -> Result<Self, C45Error> {
        let name = series.name().to_string();

        if series.dtype().is_numeric() {
            let casted = series.cast(&DataType::Float64)?;
            let sample = casted.f64()?
                .into_iter()
                .enumerate()
                .map(|(row, v)| {
                    v.filter(|v| v.is_finite())
                        .ok_or_else(|| C45Error::MissingValue {
                            column: name.clone(),
                            row,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Self::Numeric(NumericFeature { name, sample }))
        } else {
            let casted = series.cast(&DataType::Utf8)?;
            let sample = casted.utf8()?
                .into_iter()
                .enumerate()
                .map(|(row, v)| {
                    v.map(|v| v.to_string())
                        .ok_or_else(|| C45Error::MissingValue {
                            column: name.clone(),
                            row,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Self::Categorical(CategoricalFeature { name, sample }))
        }
    }


    /// Build a feature from the raw cells of a CSV column.
    /// The column is numeric iff every cell parses as a finite `f64`.
    pub(crate) fn from_cells(name: String, cells: Vec<String>) -> Self {
        let numeric = cells.iter()
            .map(|cell| cell.parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect::<Option<Vec<_>>>();

        match numeric {
            Some(sample) if !sample.is_empty() => {
                Self::Numeric(NumericFeature { name, sample })
            },
            _ => Self::Categorical(CategoricalFeature { name, sample: cells }),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_cells_are_typed_by_content() {
        let numeric = Feature::from_cells(
            "x".into(),
            vec!["1".into(), "-2.5".into(), "3e2".into()],
        );
        assert_eq!(numeric.kind(), AttributeKind::Numeric);
        assert_eq!(numeric.value(2), Some(ValueRef::Numeric(300.0)));

        let mixed = Feature::from_cells(
            "colour".into(),
            vec!["1".into(), "red".into()],
        );
        assert_eq!(mixed.kind(), AttributeKind::Categorical);
        assert_eq!(mixed.value(0), Some(ValueRef::Categorical("1")));
        assert_eq!(mixed.value(2), None);
    }


    #[test]
    fn numeric_labels_are_textual() {
        let labels = Feature::numeric("y", [1.0, 0.5]).into_labels();
        assert_eq!(labels, vec!["1".to_string(), "0.5".to_string()]);
    }
}
