//! Storage value bridge
//!
//! Converts [`Optional`] values to and from the small set of primitive
//! values a database column can hold. Non-present options are stored as
//! `NULL`; a `NULL` read back is absent.

pub mod sqlite;

use chrono::{DateTime, Utc};
use log::debug;

use crate::error::IncompatibleStorageTypeError;
use crate::optional::Optional;

/// A primitive storage-layer value
#[derive(Debug, Clone, PartialEq)]
pub enum StorageValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Timestamp(DateTime<Utc>),
}

impl StorageValue {
    /// Name of the storage kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            StorageValue::Null => "null",
            StorageValue::Bool(_) => "bool",
            StorageValue::Integer(_) => "integer",
            StorageValue::Real(_) => "real",
            StorageValue::Text(_) => "text",
            StorageValue::Blob(_) => "blob",
            StorageValue::Timestamp(_) => "timestamp",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StorageValue::Null)
    }
}

/// Types that can be stored as a [`StorageValue`] and recovered from one.
///
/// `from_storage` is never called with `StorageValue::Null`.
pub trait StorageCoercible: Sized {
    fn to_storage(&self) -> StorageValue;

    fn from_storage(value: StorageValue) -> Result<Self, IncompatibleStorageTypeError>;
}

impl StorageCoercible for bool {
    fn to_storage(&self) -> StorageValue {
        StorageValue::Bool(*self)
    }

    fn from_storage(value: StorageValue) -> Result<Self, IncompatibleStorageTypeError> {
        match value {
            StorageValue::Bool(v) => Ok(v),
            StorageValue::Integer(0) => Ok(false),
            StorageValue::Integer(1) => Ok(true),
            other => Err(IncompatibleStorageTypeError::new::<Self>(other.kind())),
        }
    }
}

impl StorageCoercible for i64 {
    fn to_storage(&self) -> StorageValue {
        StorageValue::Integer(*self)
    }

    fn from_storage(value: StorageValue) -> Result<Self, IncompatibleStorageTypeError> {
        match value {
            StorageValue::Integer(v) => Ok(v),
            other => Err(IncompatibleStorageTypeError::new::<Self>(other.kind())),
        }
    }
}

impl StorageCoercible for i32 {
    fn to_storage(&self) -> StorageValue {
        StorageValue::Integer(i64::from(*self))
    }

    fn from_storage(value: StorageValue) -> Result<Self, IncompatibleStorageTypeError> {
        match value {
            StorageValue::Integer(v) => {
                i32::try_from(v).map_err(|_| IncompatibleStorageTypeError::new::<Self>("integer out of range"))
            }
            other => Err(IncompatibleStorageTypeError::new::<Self>(other.kind())),
        }
    }
}

impl StorageCoercible for f64 {
    fn to_storage(&self) -> StorageValue {
        StorageValue::Real(*self)
    }

    fn from_storage(value: StorageValue) -> Result<Self, IncompatibleStorageTypeError> {
        match value {
            StorageValue::Real(v) => Ok(v),
            StorageValue::Integer(v) => Ok(v as f64),
            other => Err(IncompatibleStorageTypeError::new::<Self>(other.kind())),
        }
    }
}

impl StorageCoercible for String {
    fn to_storage(&self) -> StorageValue {
        StorageValue::Text(self.clone())
    }

    fn from_storage(value: StorageValue) -> Result<Self, IncompatibleStorageTypeError> {
        match value {
            StorageValue::Text(v) => Ok(v),
            other => Err(IncompatibleStorageTypeError::new::<Self>(other.kind())),
        }
    }
}

impl StorageCoercible for Vec<u8> {
    fn to_storage(&self) -> StorageValue {
        StorageValue::Blob(self.clone())
    }

    fn from_storage(value: StorageValue) -> Result<Self, IncompatibleStorageTypeError> {
        match value {
            StorageValue::Blob(v) => Ok(v),
            StorageValue::Text(v) => Ok(v.into_bytes()),
            other => Err(IncompatibleStorageTypeError::new::<Self>(other.kind())),
        }
    }
}

impl StorageCoercible for DateTime<Utc> {
    fn to_storage(&self) -> StorageValue {
        StorageValue::Timestamp(*self)
    }

    fn from_storage(value: StorageValue) -> Result<Self, IncompatibleStorageTypeError> {
        match value {
            StorageValue::Timestamp(v) => Ok(v),
            StorageValue::Text(v) => DateTime::parse_from_rfc3339(&v)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    debug!("Text '{}' is not an RFC 3339 timestamp: {}", v, e);
                    IncompatibleStorageTypeError::new::<Self>("text")
                }),
            other => Err(IncompatibleStorageTypeError::new::<Self>(other.kind())),
        }
    }
}

impl<T> Optional<T>
where
    T: StorageCoercible,
{
    /// Convert to a storage value. Absent and null both become `Null`.
    pub fn to_storage(&self) -> StorageValue {
        match self {
            Optional::Some(v) => v.to_storage(),
            _ => StorageValue::Null,
        }
    }

    /// Convert from a storage value. `Null` becomes absent.
    pub fn from_storage(value: StorageValue) -> Result<Self, IncompatibleStorageTypeError> {
        if value.is_null() {
            return Ok(Optional::Absent);
        }
        T::from_storage(value).map(Optional::Some)
    }
}
