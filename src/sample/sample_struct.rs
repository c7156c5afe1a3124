use std::path::Path;
use std::fs::File;
use std::collections::HashMap;
use std::ops::Index;

use polars::prelude::*;

use crate::C45Error;
use super::feature_struct::*;
use super::record::{Record, ValueRef};


/// Struct `Sample` holds a labeled dataset in column-oriented form.
/// Rows are addressed by index and subsets are index lists,
/// so bootstrap subsets may repeat rows.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) target_name: Option<String>,
    pub(super) target: Vec<String>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


impl Sample {
    /// Construct a sample from feature columns.
    /// No target is set; use [`Sample::set_target`].
    pub fn from_features(features: Vec<Feature>) -> Result<Self, C45Error> {
        let n_sample = features.first()
            .map(|feat| feat.len())
            .unwrap_or(0);

        let mut name_to_index = HashMap::with_capacity(features.len());
        for (i, feat) in features.iter().enumerate() {
            if feat.len() != n_sample {
                return Err(C45Error::ColumnLengthMismatch {
                    name: feat.name().to_string(),
                    expected: n_sample,
                    got: feat.len(),
                });
            }
            if let Some(row) = feat.first_non_finite() {
                return Err(C45Error::MissingValue {
                    column: feat.name().to_string(),
                    row,
                });
            }
            if name_to_index.insert(feat.name().to_string(), i).is_some() {
                return Err(C45Error::DuplicateColumn {
                    name: feat.name().to_string(),
                });
            }
        }

        let n_feature = features.len();
        let sample = Self {
            name_to_index,
            features,
            target_name: None,
            target: Vec::with_capacity(0),
            n_sample,
            n_feature,
        };
        Ok(sample)
    }


    /// Convert `polars::DataFrame` into `Sample`.
    /// Numeric columns become numeric features, the others categorical.
    /// No target is set; use [`Sample::set_target`].
    pub fn from_dataframe(data: &DataFrame) -> Result<Self, C45Error> {
        let features = data.get_columns()
            .iter()
            .map(Feature::from_series)
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_features(features)
    }


    /// Read a CSV format file to `Sample` type.
    /// Without a header, the columns are named `Feat. [1]`, `Feat. [2]`, ....
    /// A column is numeric iff all of its cells parse as finite numbers.
    pub fn from_csv<P>(file: P, has_header: bool) -> Result<Self, C45Error>
        where P: AsRef<Path>,
    {
        let path = file.as_ref();
        let read_error = |source| C45Error::ReadSample {
            path: path.to_path_buf(),
            source,
        };

        // Open the given `file`.
        let file = File::open(path).map_err(read_error)?;
        let parse_error = |source: csv::Error| C45Error::CsvParse {
            path: path.to_path_buf(),
            line: source.position().map_or(0, |p| p.line() as usize),
            source,
        };

        // `flexible` lets ragged rows through to the `RaggedRow` check below.
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut names: Option<Vec<String>> = None;
        if has_header {
            let header = reader.headers().map_err(parse_error)?;
            names = Some(header.iter().map(str::to_string).collect());
        }

        let mut columns: Vec<Vec<String>> = Vec::new();
        let mut n_sample = 0_usize;
        for record in reader.records() {
            let record = record.map_err(parse_error)?;
            if record.iter().all(str::is_empty) && record.len() <= 1 {
                continue;
            }

            // if the header does not exist,
            // construct a dummy header.
            let n_feature = names.get_or_insert_with(|| {
                (1..=record.len()).map(|i| format!("Feat. [{i}]"))
                    .collect()
            }).len();

            if columns.is_empty() {
                columns = vec![Vec::new(); n_feature];
            }

            if record.len() != n_feature {
                return Err(C45Error::RaggedRow {
                    line: record.position().map_or(0, |p| p.line() as usize),
                    expected: n_feature,
                    got: record.len(),
                });
            }

            for (j, cell) in record.iter().enumerate() {
                if cell.is_empty() {
                    let column = names.as_ref()
                        .map(|names| names[j].clone())
                        .unwrap_or_default();
                    return Err(C45Error::MissingValue {
                        column,
                        row: n_sample,
                    });
                }
                columns[j].push(cell.to_string());
            }
            n_sample += 1;
        }

        let names = names.unwrap_or_default();
        if columns.is_empty() {
            columns = vec![Vec::new(); names.len()];
        }
        let features = names.into_iter()
            .zip(columns)
            .map(|(name, cells)| Feature::from_cells(name, cells))
            .collect::<Vec<_>>();

        Self::from_features(features)
    }


    /// Set the feature of name `target` as the label column.
    /// The column is removed from the features,
    /// and the old target (if any) is dropped.
    /// Numeric columns are converted to their textual form.
    pub fn set_target<S: AsRef<str>>(mut self, target: S)
        -> Result<Self, C45Error>
    {
        let target = target.as_ref();
        let pos = self.features.iter()
            .position(|feat| feat.name() == target)
            .ok_or_else(|| C45Error::UnknownColumn {
                name: target.to_string(),
            })?;


        self.target = self.features.remove(pos).into_labels();
        self.target_name = Some(target.to_string());
        self.n_feature -= 1;


        self.name_to_index = self.features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        Ok(self)
    }


    /// Returns the class labels.
    /// The slice is empty if no target is set.
    pub fn target(&self) -> &[String] {
        &self.target[..]
    }


    /// Returns the name of the label column, if set.
    pub fn target_name(&self) -> Option<&str> {
        self.target_name.as_deref()
    }


    /// Returns the class labels, or `TargetNotSet`.
    pub(crate) fn labels(&self) -> Result<&[String], C45Error> {
        if self.target_name.is_none() {
            return Err(C45Error::TargetNotSet);
        }
        Ok(&self.target[..])
    }


    /// Returns a slice of type `Feature`.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the feature of name `name`.
    pub fn feature(&self, name: &str) -> Result<&Feature, C45Error> {
        self.name_to_index.get(name)
            .map(|&k| &self.features[k])
            .ok_or_else(|| C45Error::UnknownColumn { name: name.to_string() })
    }


    /// Returns the values of the numeric column `name`.
    pub fn numeric_column(&self, name: &str) -> Result<&[f64], C45Error> {
        match self.feature(name)? {
            Feature::Numeric(feat) => Ok(&feat.sample[..]),
            Feature::Categorical(_) => Err(C45Error::AttributeTypeMismatch {
                attribute: name.to_string(),
                expected: AttributeKind::Numeric,
            }),
        }
    }


    /// Returns the values of the categorical column `name`.
    pub fn categorical_column(&self, name: &str)
        -> Result<&[String], C45Error>
    {
        match self.feature(name)? {
            Feature::Categorical(feat) => Ok(&feat.sample[..]),
            Feature::Numeric(_) => Err(C45Error::AttributeTypeMismatch {
                attribute: name.to_string(),
                expected: AttributeKind::Categorical,
            }),
        }
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns `true` if this sample has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_sample == 0
    }


    /// Returns the indices of all rows, `0..n_sample`.
    pub fn indices(&self) -> Vec<usize> {
        (0..self.n_sample).collect()
    }


    /// Returns the `row`-th example as a [`Record`].
    pub fn row(&self, row: usize) -> Result<SampleRow<'_>, C45Error> {
        self.check_row(row)?;
        Ok(SampleRow { sample: self, row })
    }


    pub(crate) fn check_row(&self, row: usize) -> Result<(), C45Error> {
        if row >= self.n_sample {
            return Err(C45Error::RowOutOfBounds {
                row,
                n_sample: self.n_sample,
            });
        }
        Ok(())
    }


    pub(crate) fn check_indices(&self, indices: &[usize])
        -> Result<(), C45Error>
    {
        indices.iter().try_for_each(|&row| self.check_row(row))
    }
}


/// A borrowed row of a [`Sample`].
#[derive(Debug, Clone, Copy)]
pub struct SampleRow<'a> {
    sample: &'a Sample,
    row: usize,
}


impl<'a> SampleRow<'a> {
    /// Returns the index of this row.
    pub fn index(&self) -> usize {
        self.row
    }


    /// Returns the label of this row, if a target is set.
    pub fn label(&self) -> Option<&'a str> {
        self.sample.target.get(self.row).map(|y| y.as_str())
    }
}


impl Record for SampleRow<'_> {
    fn value(&self, attribute: &str) -> Option<ValueRef<'_>> {
        self.sample.name_to_index.get(attribute)
            .and_then(|&k| self.sample.features[k].value(self.row))
    }
}


impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;


    /// # Panics
    /// Panics if the column does not exist.
    /// Use [`Sample::feature`] for a fallible lookup.
    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        match self.name_to_index.get(name) {
            Some(&k) => &self.features[k],
            None => panic!("The column `{name}` does not exist"),
        }
    }
}
