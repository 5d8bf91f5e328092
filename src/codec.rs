//! JSON transcoding entry points
//!
//! The serde impls on [`Optional`] cover fields of derived structs. These
//! helpers cover the cases serde cannot express on its own: telling the
//! caller to omit a field, treating empty input as absent, and reading or
//! writing fields of a dynamic `serde_json::Map`.

use log::{debug, trace};
use serde::Serialize;
use serde::de::{Deserialize, DeserializeOwned};
use serde_json::{Map, Value};

use crate::optional::Optional;

/// The literal JSON null token.
pub const NULL_BYTES: &[u8] = b"null";

/// Encode an option as JSON.
///
/// Returns `Ok(None)` for an absent option: the field should be left out
/// of the enclosing object entirely.
pub fn encode<T>(value: &Optional<T>) -> Result<Option<Vec<u8>>, serde_json::Error>
where
    T: Serialize,
{
    match value {
        Optional::Absent => Ok(None),
        Optional::Null => Ok(Some(NULL_BYTES.to_vec())),
        Optional::Some(v) => serde_json::to_vec(v).map(Some),
    }
}

/// Decode an option from JSON bytes.
///
/// Empty (or whitespace-only) input is absent, `null` is null, anything else
/// is decoded as `T` with decode errors returned unchanged.
pub fn decode<T>(data: &[u8]) -> Result<Optional<T>, serde_json::Error>
where
    T: DeserializeOwned,
{
    if data.iter().all(u8::is_ascii_whitespace) {
        trace!("Decoding {} blank bytes as absent", data.len());
        return Ok(Optional::Absent);
    }

    serde_json::from_slice(data)
}

/// Read `key` from a JSON object, treating a missing key as absent.
pub fn get_field<'a, T>(object: &'a Map<String, Value>, key: &str) -> Result<Optional<T>, serde_json::Error>
where
    T: Deserialize<'a>,
{
    match object.get(key) {
        None => Ok(Optional::Absent),
        Some(Value::Null) => Ok(Optional::Null),
        Some(value) => T::deserialize(value).map(Optional::Some).map_err(|e| {
            debug!("Field '{}' failed to decode: {}", key, e);
            e
        }),
    }
}

/// Write `key` into a JSON object. An absent option removes the key.
pub fn set_field<T>(object: &mut Map<String, Value>, key: &str, value: &Optional<T>) -> Result<(), serde_json::Error>
where
    T: Serialize,
{
    match value {
        Optional::Absent => {
            object.remove(key);
        }
        Optional::Null => {
            object.insert(key.to_string(), Value::Null);
        }
        Optional::Some(v) => {
            object.insert(key.to_string(), serde_json::to_value(v)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_table() {
        assert_eq!(encode(&Optional::<i32>::none()).unwrap(), None);
        assert_eq!(encode(&Optional::<i32>::null()).unwrap(), Some(b"null".to_vec()));
        assert_eq!(encode(&Optional::some("a")).unwrap(), Some(br#""a""#.to_vec()));
    }

    #[test]
    fn test_decode_table() {
        assert!(decode::<i32>(b"").unwrap().is_none());
        assert!(decode::<i32>(b"  \n").unwrap().is_none());
        assert!(decode::<i32>(b"null").unwrap().is_null());
        assert_eq!(decode::<i32>(b"12").unwrap(), Optional::some(12));
    }

    #[test]
    fn test_decode_error_passes_through() {
        let err = decode::<i32>(br#""twelve""#).unwrap_err();
        let direct = serde_json::from_str::<i32>(r#""twelve""#).unwrap_err();
        assert_eq!(err.to_string(), direct.to_string());
        assert!(err.is_data());
    }

    #[test]
    fn test_get_field() {
        let doc = json!({ "a": 1, "b": null });
        let object = doc.as_object().unwrap();

        assert_eq!(get_field::<i64>(object, "a").unwrap(), Optional::some(1));
        assert!(get_field::<i64>(object, "b").unwrap().is_null());
        assert!(get_field::<i64>(object, "c").unwrap().is_none());
        assert!(get_field::<String>(object, "a").is_err());
    }

    #[test]
    fn test_set_field() {
        let mut object = Map::new();
        object.insert("gone".to_string(), json!(true));

        set_field(&mut object, "gone", &Optional::<bool>::none()).unwrap();
        set_field(&mut object, "cleared", &Optional::<bool>::null()).unwrap();
        set_field(&mut object, "set", &Optional::some(vec![1, 2])).unwrap();

        assert_eq!(Value::Object(object), json!({ "cleared": null, "set": [1, 2] }));
    }
}
