//! Defines [`C45Error`], the error returned by every fallible operation.
use std::path::PathBuf;

use crate::sample::AttributeKind;


/// Errors from tree induction, classification, pruning, forest generation
/// and the sample readers.
#[derive(Debug, thiserror::Error)]
pub enum C45Error {
    /// Returned when an entropy, a split, a mode label or an accuracy
    /// is requested on zero rows.
    #[error("the requested set of rows is empty")]
    EmptyDataset,

    /// Returned when classification reaches a split whose attribute
    /// is missing from the point (`value == None`),
    /// or whose category was never seen while training.
    #[error("cannot route attribute `{attribute}`: {}", describe_value(.value))]
    UnknownCategory {
        /// The split attribute.
        attribute: String,
        /// The offending category, `None` if the attribute is missing.
        value: Option<String>,
    },

    /// Returned when a tree has a malformed node,
    /// e.g., a numeric split without its `greater` child.
    #[error("invalid tree structure: {reason}")]
    InvalidTreeStructure {
        /// Human-readable description of the defect.
        reason: String,
    },

    /// Returned when categorical logic is applied to a numeric column
    /// or vice versa.
    #[error("attribute `{attribute}` is not {expected}")]
    AttributeTypeMismatch {
        /// The offending attribute.
        attribute: String,
        /// The kind the operation expected.
        expected: AttributeKind,
    },

    /// Returned when a column name does not exist in the sample.
    #[error("the column `{name}` does not exist")]
    UnknownColumn {
        /// The requested column name.
        name: String,
    },

    /// Returned when two columns share the same name.
    #[error("the column `{name}` appears more than once")]
    DuplicateColumn {
        /// The duplicated name.
        name: String,
    },

    /// Returned when an operation needs labels
    /// but no target column has been designated.
    #[error("no target (label) column is set, use `Sample::set_target`")]
    TargetNotSet,

    /// Returned when the columns of a sample differ in length.
    #[error("column `{name}` has {got} rows, expected {expected}")]
    ColumnLengthMismatch {
        /// The offending column.
        name: String,
        /// The number of rows of the first column.
        expected: usize,
        /// The number of rows of the offending column.
        got: usize,
    },

    /// Returned when a CSV line has a different number of cells
    /// than the header.
    #[error("line {line} has {got} cells, expected {expected}")]
    RaggedRow {
        /// One-based line number in the file.
        line: usize,
        /// The number of columns.
        expected: usize,
        /// The number of cells found on the line.
        got: usize,
    },

    /// Returned when a cell is empty, null or not a finite number.
    #[error("missing value in column `{column}` at row {row}")]
    MissingValue {
        /// The column of the missing cell.
        column: String,
        /// The zero-based row of the missing cell.
        row: usize,
    },

    /// Returned when a row index exceeds the number of examples.
    #[error("row {row} is out of bounds for a sample of {n_sample} rows")]
    RowOutOfBounds {
        /// The offending row index.
        row: usize,
        /// The number of rows in the sample.
        n_sample: usize,
    },

    /// Returned when a builder parameter is out of its domain.
    #[error("invalid value for `{parameter}`: {reason}")]
    InvalidConfig {
        /// The name of the parameter.
        parameter: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Returned when no member of a forest produces a label for a point.
    #[error("no forest member produced a label")]
    EmptyEnsemble,

    /// Returned when reading a sample file fails.
    #[error("failed to read sample from {path}")]
    ReadSample {
        /// Path to the file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a sample file is not well-formed CSV.
    #[error("malformed CSV record in {path} at line {line}")]
    CsvParse {
        /// Path to the file.
        path: PathBuf,
        /// One-based line number of the record, `0` if unknown.
        line: usize,
        /// The underlying CSV error.
        source: csv::Error,
    },

    /// Returned when writing a log or a `.dot` file fails.
    #[error("failed to write {path}")]
    WriteFile {
        /// Path to the file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a `polars` conversion fails.
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),

    /// Returned when the JSON interchange form cannot be (de)serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}


fn describe_value(value: &Option<String>) -> String {
    match value {
        Some(value) => format!("the category `{value}` was not seen while training"),
        None => "the attribute is missing from the point".to_string(),
    }
}
