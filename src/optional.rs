//! Tri-state optional values
//!
//! [`Optional`] tells apart a field that was never provided, a field that was
//! explicitly set to `null`, and a field that carries a value. This is the
//! distinction PATCH-style request bodies need and that `Option<T>` loses.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::NoneValueTakenError;

/// The tag of an [`Optional`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Field is not provided
    Absent,
    /// Field is provided but null
    Null,
    /// Field has a value
    Present,
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Absent => "absent",
            State::Null => "null",
            State::Present => "present",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An optional value that is either absent, explicitly null, or present.
///
/// When used as a struct field, annotate it so that absent values are
/// omitted on output and missing keys decode as absent:
///
/// ```
/// use json_optional::Optional;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Patch {
///     #[serde(default, skip_serializing_if = "Optional::is_none")]
///     name: Optional<String>,
/// }
///
/// let patch: Patch = serde_json::from_str(r#"{"name":null}"#).unwrap();
/// assert!(patch.name.is_null());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Optional<T> {
    /// Field is not provided
    #[default]
    Absent,
    /// Field is provided but null
    Null,
    /// Field has a value
    Some(T),
}

impl<T> Optional<T> {
    /// Create an option holding `value`.
    pub fn some(value: T) -> Self {
        Optional::Some(value)
    }

    /// Create an option for a field that was not provided.
    pub fn none() -> Self {
        Optional::Absent
    }

    /// Create an option for a field that was explicitly set to null.
    pub fn null() -> Self {
        Optional::Null
    }

    /// `null()` when `cond` holds, `some(value)` otherwise.
    pub fn null_if(value: T, cond: bool) -> Self {
        if cond {
            Optional::Null
        } else {
            Optional::Some(value)
        }
    }

    /// Lift a nullable reference, copying the referent.
    ///
    /// Use [`Optional::ptr_from_nullable`] to keep the reference instead.
    pub fn from_nullable(value: Option<&T>) -> Self
    where
        T: Clone,
    {
        match value {
            Some(v) => Optional::Some(v.clone()),
            None => Optional::Absent,
        }
    }

    /// The tag of this option, without its payload.
    pub fn state(&self) -> State {
        match self {
            Optional::Absent => State::Absent,
            Optional::Null => State::Null,
            Optional::Some(_) => State::Present,
        }
    }

    /// True when the option holds a value.
    pub fn is_some(&self) -> bool {
        matches!(self, Optional::Some(_))
    }

    /// True when the field was not provided.
    pub fn is_none(&self) -> bool {
        matches!(self, Optional::Absent)
    }

    /// True when the field was provided as null.
    pub fn is_null(&self) -> bool {
        matches!(self, Optional::Null)
    }

    /// Return the value, or `T::default()` when absent or null. Never panics.
    pub fn unwrap(self) -> T
    where
        T: Default,
    {
        match self {
            Optional::Some(v) => v,
            _ => T::default(),
        }
    }

    /// Borrow the value if present.
    pub fn unwrap_as_ref(&self) -> Option<&T> {
        match self {
            Optional::Some(v) => Some(v),
            _ => None,
        }
    }

    /// Take the value, failing when the option is absent or null.
    pub fn take(self) -> Result<T, NoneValueTakenError> {
        match self {
            Optional::Some(v) => Ok(v),
            other => Err(NoneValueTakenError::new(other.state())),
        }
    }

    /// Return the value, or `fallback` when absent or null.
    pub fn take_or(self, fallback: T) -> T {
        match self {
            Optional::Some(v) => v,
            _ => fallback,
        }
    }

    /// Take the value, calling `fallback` only when there is none.
    pub fn take_or_else<F>(self, fallback: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Optional::Some(v) => v,
            _ => fallback(),
        }
    }

    /// Build from the double-option idiom: `None` is absent, `Some(None)` is null.
    pub fn from_double_option(value: Option<Option<T>>) -> Self {
        match value {
            None => Optional::Absent,
            Some(None) => Optional::Null,
            Some(Some(v)) => Optional::Some(v),
        }
    }

    /// Convert to the double-option idiom: absent is `None`, null is `Some(None)`.
    pub fn into_double_option(self) -> Option<Option<T>> {
        match self {
            Optional::Absent => None,
            Optional::Null => Some(None),
            Optional::Some(v) => Some(Some(v)),
        }
    }

    /// Collapse into a plain `Option`, dropping the absent/null distinction.
    pub fn into_option(self) -> Option<T> {
        match self {
            Optional::Some(v) => Some(v),
            _ => None,
        }
    }

    /// `self` when present, otherwise `fallback` as-is (absent and null included).
    pub fn or(self, fallback: Optional<T>) -> Optional<T> {
        match self {
            Optional::Some(_) => self,
            _ => fallback,
        }
    }

    /// `self` when present, otherwise the result of `fallback`, called at most once.
    pub fn or_else<F>(self, fallback: F) -> Optional<T>
    where
        F: FnOnce() -> Optional<T>,
    {
        match self {
            Optional::Some(_) => self,
            _ => fallback(),
        }
    }

    /// Keep the value if it matches `predicate`, otherwise return `none()`.
    ///
    /// The predicate only ever sees real values: absent and null options
    /// fail the filter without it being called.
    pub fn filter<P>(self, predicate: P) -> Optional<T>
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Optional::Some(v) => {
                if predicate(&v) {
                    Optional::Some(v)
                } else {
                    Optional::Absent
                }
            }
            _ => Optional::Absent,
        }
    }

    /// Call `f` with the value if present.
    pub fn if_some<F>(&self, f: F)
    where
        F: FnOnce(&T),
    {
        if let Optional::Some(v) = self {
            f(v);
        }
    }

    /// Call `f` with the value if present and return its result.
    pub fn if_some_with_error<F, E>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce(&T) -> Result<(), E>,
    {
        match self {
            Optional::Some(v) => f(v),
            _ => Ok(()),
        }
    }

    /// Call `f` if the field was not provided.
    pub fn if_none<F>(&self, f: F)
    where
        F: FnOnce(),
    {
        if self.is_none() {
            f();
        }
    }

    /// Call `f` if the field was not provided and return its result.
    pub fn if_none_with_error<F, E>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        if self.is_none() { f() } else { Ok(()) }
    }

    /// Call `f` if the field was provided as null.
    pub fn if_null<F>(&self, f: F)
    where
        F: FnOnce(),
    {
        if self.is_null() {
            f();
        }
    }

    /// Call `f` if the field was provided as null and return its result.
    pub fn if_null_with_error<F, E>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<(), E>,
    {
        if self.is_null() { f() } else { Ok(()) }
    }
}

impl<'a, T> Optional<&'a T> {
    /// Lift a nullable reference without copying; the option borrows the referent.
    pub fn ptr_from_nullable(value: Option<&'a T>) -> Self {
        match value {
            Some(v) => Optional::Some(v),
            None => Optional::Absent,
        }
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Optional::Some(v),
            None => Optional::Absent,
        }
    }
}

/// `Some(Some(v))` is present, `Some(None)` is null, `None` is absent.
impl<T> From<Optional<T>> for Option<Option<T>> {
    fn from(value: Optional<T>) -> Self {
        value.into_double_option()
    }
}

/// Renders `None[]`, `Null[<default>]` or `Some[<value>]`.
impl<T> fmt::Display for Optional<T>
where
    T: fmt::Display + Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Optional::Absent => write!(f, "None[]"),
            Optional::Null => write!(f, "Null[{}]", T::default()),
            Optional::Some(v) => write!(f, "Some[{}]", v),
        }
    }
}

/// Same layout as `Display`, with the payload's `Debug` form.
impl<T> fmt::Debug for Optional<T>
where
    T: fmt::Debug + Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Optional::Absent => write!(f, "None[]"),
            Optional::Null => write!(f, "Null[{:?}]", T::default()),
            Optional::Some(v) => write!(f, "Some[{:?}]", v),
        }
    }
}

impl<T> Serialize for Optional<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Optional::Some(v) => serializer.serialize_some(v),
            // Absent is only written when the field isn't skipped
            Optional::Null | Optional::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de, T> Deserialize<'de> for Optional<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Missing fields never reach here when annotated with #[serde(default)]
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Optional::Some(v),
            None => Optional::Null,
        })
    }
}
