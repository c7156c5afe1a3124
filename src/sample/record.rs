//! Records are the things a classifier routes through a tree:
//! free-standing [`Point`]s and rows of a [`Sample`](crate::Sample).
use serde::{Serialize, Deserialize};

use std::collections::BTreeMap;
use std::fmt;


/// An owned attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A real value.
    Numeric(f64),
    /// A category.
    Categorical(String),
}


/// A borrowed attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRef<'a> {
    /// A real value.
    Numeric(f64),
    /// A category.
    Categorical(&'a str),
}


impl Value {
    /// Borrow this value.
    pub fn view(&self) -> ValueRef<'_> {
        match self {
            Self::Numeric(v) => ValueRef::Numeric(*v),
            Self::Categorical(v) => ValueRef::Categorical(v.as_str()),
        }
    }
}


impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Numeric(v)
    }
}


impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Categorical(v.to_string())
    }
}


impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Categorical(v)
    }
}


impl fmt::Display for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "{v}"),
            Self::Categorical(v) => write!(f, "{v}"),
        }
    }
}


/// Attribute lookup used by classification.
pub trait Record {
    /// Returns the value of `attribute`, or `None` if this record
    /// does not carry it.
    fn value(&self, attribute: &str) -> Option<ValueRef<'_>>;
}


/// A free-standing record: a map from column name to value.
///
/// ```
/// use miniforest::Point;
/// let point = Point::new()
///     .with("colour", "red")
///     .with("weight", 180.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point {
    values: BTreeMap<String, Value>,
}


impl Point {
    /// Construct an empty point.
    pub fn new() -> Self {
        Self::default()
    }


    /// Set `attribute` to `value` and return `self`.
    pub fn with<S, V>(mut self, attribute: S, value: V) -> Self
        where S: ToString,
              V: Into<Value>,
    {
        self.insert(attribute, value);
        self
    }


    /// Set `attribute` to `value`,
    /// returning the previous value if any.
    pub fn insert<S, V>(&mut self, attribute: S, value: V) -> Option<Value>
        where S: ToString,
              V: Into<Value>,
    {
        self.values.insert(attribute.to_string(), value.into())
    }


    /// Remove `attribute` from this point.
    pub fn remove(&mut self, attribute: &str) -> Option<Value> {
        self.values.remove(attribute)
    }
}


impl<S, V> FromIterator<(S, V)> for Point
    where S: ToString,
          V: Into<Value>,
{
    fn from_iter<I>(iter: I) -> Self
        where I: IntoIterator<Item = (S, V)>
    {
        let values = iter.into_iter()
            .map(|(s, v)| (s.to_string(), v.into()))
            .collect();
        Self { values }
    }
}


impl Record for Point {
    fn value(&self, attribute: &str) -> Option<ValueRef<'_>> {
        self.values.get(attribute).map(Value::view)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_lookup() {
        let mut point = Point::new()
            .with("colour", "red")
            .with("weight", 180.0);

        assert_eq!(point.value("colour"), Some(ValueRef::Categorical("red")));
        assert_eq!(point.value("weight"), Some(ValueRef::Numeric(180.0)));
        assert_eq!(point.value("size"), None);

        point.remove("colour");
        assert_eq!(point.value("colour"), None);
    }


    #[test]
    fn point_from_json() {
        let point: Point = serde_json::from_str(
            r#"{"colour": "green", "weight": 12.5}"#
        ).unwrap();
        assert_eq!(point.value("colour"), Some(ValueRef::Categorical("green")));
        assert_eq!(point.value("weight"), Some(ValueRef::Numeric(12.5)));
    }
}
