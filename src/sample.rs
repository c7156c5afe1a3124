//! Struct `Sample` represents a labeled, column-oriented dataset.

// Provides feature struct.
pub(crate) mod feature_struct;
// Provides sample struct.
pub(crate) mod sample_struct;
// Provides records (rows) that a classifier can route.
pub(crate) mod record;

// Provides a struct that reads a file.
pub(crate) mod sample_reader;


pub use sample_reader::SampleReader;
pub use sample_struct::{Sample, SampleRow};
pub use feature_struct::{
    AttributeKind,
    Feature,
    NumericFeature,
    CategoricalFeature,
};
pub use record::{Record, Point, Value, ValueRef};
