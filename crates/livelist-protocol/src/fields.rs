//! Typed lookups on a JSON object, reporting the key on failure.

use serde_json::{Map, Value};

use crate::ProtocolError;

pub(crate) type Record = Map<String, Value>;

/// Views `value` as an object, or fails with `TypeMismatch(name)`.
pub(crate) fn as_record<'a>(
    value: &'a Value,
    name: &str,
) -> Result<&'a Record, ProtocolError> {
    value
        .as_object()
        .ok_or_else(|| ProtocolError::TypeMismatch(name.to_string()))
}

/// `null` counts as absent.
fn present<'a>(record: &'a Record, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

pub(crate) fn required<'a>(
    record: &'a Record,
    key: &str,
) -> Result<&'a Value, ProtocolError> {
    present(record, key)
        .ok_or_else(|| ProtocolError::MissingField(key.to_string()))
}

pub(crate) fn required_str<'a>(
    record: &'a Record,
    key: &str,
) -> Result<&'a str, ProtocolError> {
    required(record, key)?
        .as_str()
        .ok_or_else(|| ProtocolError::TypeMismatch(key.to_string()))
}

pub(crate) fn optional_str<'a>(
    record: &'a Record,
    key: &str,
) -> Result<Option<&'a str>, ProtocolError> {
    present(record, key)
        .map(|v| {
            v.as_str()
                .ok_or_else(|| ProtocolError::TypeMismatch(key.to_string()))
        })
        .transpose()
}

pub(crate) fn required_i64(
    record: &Record,
    key: &str,
) -> Result<i64, ProtocolError> {
    required(record, key)?
        .as_i64()
        .ok_or_else(|| ProtocolError::TypeMismatch(key.to_string()))
}

/// Non-negative integer that fits in a `u32`.
pub(crate) fn required_u32(
    record: &Record,
    key: &str,
) -> Result<u32, ProtocolError> {
    to_u32(required(record, key)?, key)
}

pub(crate) fn optional_u32(
    record: &Record,
    key: &str,
) -> Result<Option<u32>, ProtocolError> {
    present(record, key).map(|v| to_u32(v, key)).transpose()
}

fn to_u32(value: &Value, key: &str) -> Result<u32, ProtocolError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ProtocolError::TypeMismatch(key.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_null_is_treated_as_missing() {
        let r = record(json!({"a": null}));
        assert_eq!(
            required_str(&r, "a"),
            Err(ProtocolError::MissingField("a".into()))
        );
        assert_eq!(optional_str(&r, "a"), Ok(None));
    }

    #[test]
    fn test_wrong_type_is_mismatch() {
        let r = record(json!({"a": 5, "b": "x"}));
        assert_eq!(
            required_str(&r, "a"),
            Err(ProtocolError::TypeMismatch("a".into()))
        );
        assert_eq!(
            optional_u32(&r, "b"),
            Err(ProtocolError::TypeMismatch("b".into()))
        );
    }

    #[test]
    fn test_negative_and_oversized_integers_are_rejected() {
        let r = record(json!({"neg": -1, "big": 5_000_000_000_u64, "frac": 1.5}));
        assert!(required_u32(&r, "neg").is_err());
        assert!(required_u32(&r, "big").is_err());
        assert!(required_u32(&r, "frac").is_err());
    }

    #[test]
    fn test_as_record_rejects_non_objects() {
        assert_eq!(
            as_record(&json!([1, 2]), "data").err(),
            Some(ProtocolError::TypeMismatch("data".into()))
        );
    }
}
