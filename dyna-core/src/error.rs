//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum DynaError {
    /// An action index outside `0..4`.
    #[error("Invalid action: {0}, should be in [0, 1, 2, 3]")]
    InvalidAction(usize),

    /// Invalid hyper-parameters of an agent or a trainer.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Inconsistent description of a grid.
    #[error("Invalid map: {0}")]
    InvalidMap(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
