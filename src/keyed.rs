//! Mapping-based optional representation
//!
//! [`KeyedOptional`] stores its state in a map with two reserved keys:
//! `true` holds a present value, `false` marks an explicit null, and an empty
//! map is absent. It shares the JSON contract of [`Optional`] and converts to
//! and from it without loss.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::optional::{Optional, State};

const PRESENT_KEY: bool = true;
const NULL_KEY: bool = false;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyedOptional<T>(BTreeMap<bool, T>);

impl<T> KeyedOptional<T> {
    pub fn some(value: T) -> Self {
        Self(BTreeMap::from([(PRESENT_KEY, value)]))
    }

    pub fn none() -> Self {
        Self(BTreeMap::new())
    }

    /// The null entry carries `T::default()` as its placeholder payload.
    pub fn null() -> Self
    where
        T: Default,
    {
        Self(BTreeMap::from([(NULL_KEY, T::default())]))
    }

    pub fn null_if(value: T, cond: bool) -> Self
    where
        T: Default,
    {
        if cond { Self::null() } else { Self::some(value) }
    }

    pub fn state(&self) -> State {
        if self.0.contains_key(&PRESENT_KEY) {
            State::Present
        } else if self.0.contains_key(&NULL_KEY) {
            State::Null
        } else {
            State::Absent
        }
    }

    pub fn is_some(&self) -> bool {
        self.state() == State::Present
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_null(&self) -> bool {
        self.state() == State::Null
    }

    pub fn into_optional(self) -> Optional<T> {
        self.into()
    }
}

impl<T> From<KeyedOptional<T>> for Optional<T> {
    fn from(mut keyed: KeyedOptional<T>) -> Self {
        match keyed.0.remove(&PRESENT_KEY) {
            Some(v) => Optional::Some(v),
            None if keyed.0.contains_key(&NULL_KEY) => Optional::Null,
            None => Optional::Absent,
        }
    }
}

impl<T> From<Optional<T>> for KeyedOptional<T>
where
    T: Default,
{
    fn from(value: Optional<T>) -> Self {
        match value {
            Optional::Absent => KeyedOptional::none(),
            Optional::Null => KeyedOptional::null(),
            Optional::Some(v) => KeyedOptional::some(v),
        }
    }
}

impl<T> Serialize for KeyedOptional<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0.get(&PRESENT_KEY) {
            Some(v) => serializer.serialize_some(v),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T> Deserialize<'de> for KeyedOptional<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Optional::<T>::deserialize(deserializer).map(KeyedOptional::from)
    }
}
