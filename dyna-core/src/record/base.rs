//! Base implementation of records.
use crate::error::DynaError;
use chrono::prelude::{DateTime, Local};
use std::collections::{
    hash_map::{IntoIter, Iter, Keys},
    HashMap,
};

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value, e.g. the number of steps of an episode.
    Scalar(f32),

    /// A timestamp with local timezone.
    DateTime(DateTime<Local>),

    /// A 1-dimensional array, e.g. steps of the latest episodes.
    Array1(Vec<f32>),

    /// A 2-dimensional array in row-major order with its shape `[rows, cols]`,
    /// e.g. a value table laid out on the grid.
    Array2(Vec<f32>, [usize; 2]),

    /// A text value, e.g. the name of an algorithm.
    String(String),
}

/// A container for storing key-value pairs of various data types.
///
/// # Examples
///
/// ```rust
/// use dyna_core::record::{Record, RecordValue};
///
/// let mut record = Record::from_scalar("steps", 12.0);
/// record.insert("algorithm", RecordValue::String("Dyna-Q".to_string()));
///
/// assert_eq!(record.get_scalar("steps").unwrap(), 12.0);
/// assert_eq!(record.get_string("algorithm").unwrap(), "Dyna-Q");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys in the record.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Returns an iterator that consumes the record.
    pub fn into_iter_in_record(self) -> IntoIter<String, RecordValue> {
        self.0.into_iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges another record into this one in place.
    ///
    /// If both records contain the same key, the value from `record` wins.
    pub fn merge_inplace(&mut self, record: Record) {
        for (k, v) in record.into_iter_in_record() {
            self.0.insert(k, v);
        }
    }

    /// Gets a scalar value from the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not exist or the value is not a scalar.
    pub fn get_scalar(&self, k: &str) -> Result<f32, DynaError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(DynaError::RecordValueTypeError("Scalar".to_string())),
            None => Err(DynaError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 1-dimensional array from the record.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, DynaError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(DynaError::RecordValueTypeError("Array1".to_string())),
            None => Err(DynaError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 2-dimensional array and its shape from the record.
    pub fn get_array2(&self, k: &str) -> Result<(Vec<f32>, [usize; 2]), DynaError> {
        match self.0.get(k) {
            Some(RecordValue::Array2(v, s)) => Ok((v.clone(), *s)),
            Some(_) => Err(DynaError::RecordValueTypeError("Array2".to_string())),
            None => Err(DynaError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a string value from the record.
    pub fn get_string(&self, k: &str) -> Result<String, DynaError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(DynaError::RecordValueTypeError("String".to_string())),
            None => Err(DynaError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns `true` if the record contains no key-value pairs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of key-value pairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let record = Record::from_slice(&[
            ("steps", RecordValue::Scalar(12.0)),
            ("grid", RecordValue::Array2(vec![1.0, 2.0], [1, 2])),
        ]);

        assert_eq!(record.get_scalar("steps"), Ok(12.0));
        assert_eq!(record.get_array2("grid"), Ok((vec![1.0, 2.0], [1, 2])));
        assert_eq!(
            record.get_array1("steps"),
            Err(DynaError::RecordValueTypeError("Array1".to_string()))
        );
        assert_eq!(
            record.get_scalar("reward"),
            Err(DynaError::RecordKeyError("reward".to_string()))
        );
    }

    #[test]
    fn test_merge_overwrites() {
        let mut a = Record::from_scalar("steps", 1.0);
        let mut b = Record::from_scalar("steps", 2.0);
        b.insert("reward", RecordValue::Scalar(1.0));

        a.merge_inplace(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.get_scalar("steps"), Ok(2.0));
    }
}
