//! Error types raised by `Optional` extraction and the storage bridge

use thiserror::Error;

use crate::optional::State;

/// Raised by [`Optional::take`](crate::Optional::take) when there is no value to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("none value taken")]
pub struct NoneValueTakenError {
    /// State of the option the value was taken from (`Absent` or `Null`).
    pub state: State,
}

impl NoneValueTakenError {
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

/// A storage value could not be coerced into the payload type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("incompatible data type for storage scanner on Optional<{target}>: {found}")]
pub struct IncompatibleStorageTypeError {
    /// Rust type the value was coerced into
    pub target: &'static str,
    /// Storage kind that was found
    pub found: &'static str,
}

impl IncompatibleStorageTypeError {
    pub fn new<T>(found: &'static str) -> Self {
        Self {
            target: std::any::type_name::<T>(),
            found,
        }
    }
}

/// Error raised while reading optional values out of a database row.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The column held a value that cannot be coerced into the payload type.
    #[error(transparent)]
    Incompatible(#[from] IncompatibleStorageTypeError),
    /// The database driver failed to produce the column value.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
