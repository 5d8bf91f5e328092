pub mod codec;
pub mod error;
pub mod keyed;
pub mod optional;
pub mod storage;

pub use error::{IncompatibleStorageTypeError, NoneValueTakenError, StorageError};
pub use keyed::KeyedOptional;
pub use optional::{Optional, State};
pub use storage::{StorageCoercible, StorageValue};
