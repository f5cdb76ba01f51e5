//! Types and traits for recording diagnostics of training runs.
//!
//! The training loop does not render anything by itself. Value tables,
//! visit counts and episode statistics are packed into [`Record`]s and handed
//! to a [`Recorder`], which is where plotting or exporting would hook in.
//!
//! # Core Components
//!
//! * [`Record`] - A container of key-value pairs of various data types
//! * [`RecordValue`] - The types of values that can be stored
//! * [`Recorder`] - A sink for records
//! * [`RecordStorage`] - Aggregates scalar series into summary statistics
//! * [`BufferedRecorder`] - Keeps records in memory
//! * [`NullRecorder`] - Discards all records
//!
//! # Basic Usage
//!
//! ```rust
//! use dyna_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("episode", RecordValue::Scalar(100.0));
//! record.insert("steps", RecordValue::Array1(vec![17.0, 12.0, 12.0]));
//! record.insert("value_grid", RecordValue::Array2(vec![0.0; 6], [2, 3]));
//! assert_eq!(record.get_scalar("episode").unwrap(), 100.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
pub use storage::RecordStorage;
