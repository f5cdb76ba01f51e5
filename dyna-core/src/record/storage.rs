//! Record storage and aggregation.
//!
//! Records pushed between two diagnostics are reduced to a single record:
//! scalar series become `min`/`max`/`mean`/`median`, every other value type
//! keeps its most recent value.
use super::{Record, RecordValue};
use std::collections::HashSet;
use xxhash_rust::xxh3::Xxh3Builder;

/// A storage system for records with aggregation capabilities.
#[derive(Debug, Default)]
pub struct RecordStorage {
    data: Vec<Record>,
}

fn min(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().copied().fold(f32::INFINITY, f32::min))
}

fn max(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().copied().fold(f32::NEG_INFINITY, f32::max))
}

fn mean(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().sum::<f32>() / vs.len() as f32)
}

/// Upper median, the input is sorted in place.
fn median(mut vs: Vec<f32>) -> RecordValue {
    vs.sort_by(|x, y| x.total_cmp(y));
    RecordValue::Scalar(vs[vs.len() / 2])
}

impl RecordStorage {
    /// Creates a new empty record storage.
    pub fn new() -> Self {
        Self { data: vec![] }
    }

    /// Stores a record in the storage.
    pub fn store(&mut self, record: Record) {
        self.data.push(record);
    }

    /// The number of stored records.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no record is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn get_keys(&self) -> HashSet<String, Xxh3Builder> {
        let mut keys = HashSet::<String, Xxh3Builder>::default();
        for record in self.data.iter() {
            for k in record.keys() {
                keys.insert(k.clone());
            }
        }
        keys
    }

    /// Finds the first occurrence of a value with the given key.
    fn find(&self, key: &str) -> &RecordValue {
        for record in self.data.iter() {
            if let Some(value) = record.get(key) {
                return value;
            }
        }
        panic!("Key '{}' was not found. ", key);
    }

    /// Most recent value of `key`.
    ///
    /// # Panics
    ///
    /// Panics if the stored values of `key` do not all have the same type.
    fn latest(&self, key: &str) -> Record {
        let first = std::mem::discriminant(self.find(key));
        let mut latest = None;
        for record in self.data.iter() {
            if let Some(value) = record.get(key) {
                if std::mem::discriminant(value) != first {
                    panic!("Mixed value types for {}", key);
                }
                latest = Some(value);
            }
        }
        match latest {
            Some(value) => Record::from_slice(&[(key, value.clone())]),
            None => unreachable!(),
        }
    }

    /// Aggregates scalar values with statistical measures.
    ///
    /// For a single value, returns it directly. For multiple values,
    /// calculates min, max, mean, and median.
    fn scalar(&self, key: &str) -> Record {
        let vs: Vec<f32> = self
            .data
            .iter()
            .filter_map(|record| match record.get(key) {
                Some(RecordValue::Scalar(v)) => Some(*v),
                Some(_) => panic!("Expect RecordValue::Scalar for {}", key),
                None => None,
            })
            .collect();

        if vs.len() == 1 {
            Record::from_slice(&[(key.to_string(), RecordValue::Scalar(vs[0]))])
        } else {
            Record::from_slice(&[
                (format!("{}_min", key), min(&vs)),
                (format!("{}_max", key), max(&vs)),
                (format!("{}_mean", key), mean(&vs)),
                (format!("{}_median", key), median(vs)),
            ])
        }
    }

    /// Aggregates all stored records and clears the storage.
    pub fn aggregate(&mut self) -> Record {
        let mut record = Record::empty();

        for key in self.get_keys().iter() {
            let r = match self.find(key) {
                RecordValue::Scalar(..) => self.scalar(key),
                _ => self.latest(key),
            };
            record.merge_inplace(r);
        }

        self.data = vec![];

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_scalars() {
        let mut storage = RecordStorage::new();
        for steps in [17.0, 12.0, 40.0, 13.0].iter() {
            storage.store(Record::from_scalar("episode_steps", *steps));
        }

        let record = storage.aggregate();
        assert_eq!(record.get_scalar("episode_steps_min"), Ok(12.0));
        assert_eq!(record.get_scalar("episode_steps_max"), Ok(40.0));
        assert_eq!(record.get_scalar("episode_steps_mean"), Ok(20.5));
        assert_eq!(record.get_scalar("episode_steps_median"), Ok(17.0));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_aggregate_keeps_latest_non_scalar() {
        let mut storage = RecordStorage::new();
        storage.store(Record::from_slice(&[
            ("episode_steps", RecordValue::Scalar(3.0)),
            ("algorithm", RecordValue::String("Q-learning".to_string())),
        ]));
        storage.store(Record::from_slice(&[(
            "algorithm",
            RecordValue::String("Dyna-Q".to_string()),
        )]));

        let record = storage.aggregate();
        assert_eq!(record.get_scalar("episode_steps"), Ok(3.0));
        assert_eq!(record.get_string("algorithm"), Ok("Dyna-Q".to_string()));
    }
}
