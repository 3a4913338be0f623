//! Field coercion shared by every mapping function.
//!
//! # Design
//! The API is loose about JSON literal types: prices arrive as `"12.50"`,
//! flags as `0`/`1`, ids as strings. Every record pulls its fields through the
//! helpers here so one set of rules decides what converts and what fails.
//!
//! | target | accepts | fails on |
//! |---|---|---|
//! | int | integer, float (truncated), numeric string, bool, null (0) | other strings, array, object |
//! | float | number, numeric string, bool, null (0.0) | other strings, array, object |
//! | bool | bool, number (0 is false), `1/0/true/false/yes/no/on/off/""`, null (false) | other strings, array, object |
//! | string | string, number, bool, null (`""`) | array, object |
//! | list | array, absent or null (empty) | anything else |
//! | opaque | anything, absent is null | never |
//!
//! A required scalar key that is absent is always a `MissingField`.

use serde_json::{Map, Value};

use crate::error::MappingError;
use crate::models::FromRaw;

pub(crate) type Object = Map<String, Value>;

/// Borrow `raw` as a JSON object.
pub fn as_object(raw: &Value) -> Result<&Object, MappingError> {
    raw.as_object().ok_or_else(|| invalid("object", raw))
}

/// Coerce a single JSON value to `i64`.
pub fn to_int(value: &Value) -> Result<i64, MappingError> {
    match value {
        Value::Null => Ok(0),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else {
                n.as_f64()
                    .and_then(truncate)
                    .ok_or_else(|| invalid("integer", value))
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(truncate))
                .ok_or_else(|| invalid("integer", value))
        }
        Value::Array(_) | Value::Object(_) => Err(invalid("integer", value)),
    }
}

/// Coerce a single JSON value to `f64`.
pub fn to_float(value: &Value) -> Result<f64, MappingError> {
    match value {
        Value::Null => Ok(0.0),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid("number", value)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or_else(|| invalid("number", value)),
        Value::Array(_) | Value::Object(_) => Err(invalid("number", value)),
    }
}

/// Coerce a single JSON value to `bool`.
pub fn to_bool(value: &Value) -> Result<bool, MappingError> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(invalid("boolean", value)),
        },
        Value::Array(_) | Value::Object(_) => Err(invalid("boolean", value)),
    }
}

/// Coerce a single JSON value to `String`.
pub fn to_string(value: &Value) -> Result<String, MappingError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) | Value::Object(_) => Err(invalid("string", value)),
    }
}

pub fn int(obj: &Object, key: &str) -> Result<i64, MappingError> {
    to_int(require(obj, key)?).map_err(|e| e.within(key))
}

pub fn float(obj: &Object, key: &str) -> Result<f64, MappingError> {
    to_float(require(obj, key)?).map_err(|e| e.within(key))
}

pub fn boolean(obj: &Object, key: &str) -> Result<bool, MappingError> {
    to_bool(require(obj, key)?).map_err(|e| e.within(key))
}

pub fn string(obj: &Object, key: &str) -> Result<String, MappingError> {
    to_string(require(obj, key)?).map_err(|e| e.within(key))
}

/// Copy a passthrough field verbatim. Absent keys become `null`.
pub fn opaque(obj: &Object, key: &str) -> Value {
    obj.get(key).cloned().unwrap_or(Value::Null)
}

/// Map every element of the array at `key`. Absent or null yields an empty list.
pub fn list<T: FromRaw>(obj: &Object, key: &str) -> Result<Vec<T>, MappingError> {
    each(obj, key, T::from_raw)
}

/// Like [`list`] for arrays of plain strings.
pub fn string_list(obj: &Object, key: &str) -> Result<Vec<String>, MappingError> {
    each(obj, key, to_string)
}

/// Array at `key` kept as raw JSON elements.
pub fn opaque_list(obj: &Object, key: &str) -> Result<Vec<Value>, MappingError> {
    each(obj, key, |v| Ok(v.clone()))
}

/// Map a required sub-record.
pub fn nested<T: FromRaw>(obj: &Object, key: &str) -> Result<T, MappingError> {
    T::from_raw(require(obj, key)?).map_err(|e| e.within(key))
}

/// Map a sub-record that may be absent or null.
pub fn optional<T: FromRaw>(obj: &Object, key: &str) -> Result<Option<T>, MappingError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => T::from_raw(raw).map(Some).map_err(|e| e.within(key)),
    }
}

fn each<T>(
    obj: &Object,
    key: &str,
    map: impl Fn(&Value) -> Result<T, MappingError>,
) -> Result<Vec<T>, MappingError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| map(item).map_err(|e| e.within(&format!("{key}[{i}]"))))
            .collect(),
        Some(other) => Err(invalid("array", other).within(key)),
    }
}

fn require<'a>(obj: &'a Object, key: &str) -> Result<&'a Value, MappingError> {
    obj.get(key).ok_or_else(|| MappingError::MissingField {
        field: key.to_string(),
    })
}

fn truncate(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

fn invalid(expected: &'static str, value: &Value) -> MappingError {
    MappingError::InvalidType {
        field: String::new(),
        expected,
        found: describe(value),
    }
}

pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Object {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn int_accepts_numeric_representations() {
        assert_eq!(to_int(&json!(42)).unwrap(), 42);
        assert_eq!(to_int(&json!("42")).unwrap(), 42);
        assert_eq!(to_int(&json!(" 7 ")).unwrap(), 7);
        assert_eq!(to_int(&json!(3.9)).unwrap(), 3);
        assert_eq!(to_int(&json!("-3.9")).unwrap(), -3);
        assert_eq!(to_int(&json!(true)).unwrap(), 1);
        assert_eq!(to_int(&Value::Null).unwrap(), 0);
    }

    #[test]
    fn int_rejects_non_numeric() {
        assert!(matches!(
            to_int(&json!("abc")),
            Err(MappingError::InvalidType { expected: "integer", .. })
        ));
        assert!(to_int(&json!("")).is_err());
        assert!(to_int(&json!([1])).is_err());
        assert!(to_int(&json!({"a": 1})).is_err());
        assert!(to_int(&json!(1e300)).is_err());
    }

    #[test]
    fn float_accepts_numeric_strings() {
        assert_eq!(to_float(&json!("19.99")).unwrap(), 19.99);
        assert_eq!(to_float(&json!("12.50")).unwrap(), 12.5);
        assert_eq!(to_float(&json!(10)).unwrap(), 10.0);
        assert_eq!(to_float(&json!(false)).unwrap(), 0.0);
    }

    #[test]
    fn float_rejects_garbage_and_non_finite() {
        assert!(to_float(&json!("twelve")).is_err());
        assert!(to_float(&json!("inf")).is_err());
        assert!(to_float(&json!("NaN")).is_err());
        assert!(to_float(&json!({})).is_err());
    }

    #[test]
    fn bool_accepts_truthy_and_falsy_forms() {
        assert!(to_bool(&json!(true)).unwrap());
        assert!(to_bool(&json!(1)).unwrap());
        assert!(to_bool(&json!("1")).unwrap());
        assert!(to_bool(&json!("TRUE")).unwrap());
        assert!(!to_bool(&json!(0)).unwrap());
        assert!(!to_bool(&json!(0.0)).unwrap());
        assert!(!to_bool(&json!("0")).unwrap());
        assert!(!to_bool(&json!("")).unwrap());
        assert!(!to_bool(&Value::Null).unwrap());
    }

    #[test]
    fn bool_rejects_unrecognised_strings() {
        assert!(to_bool(&json!("maybe")).is_err());
        assert!(to_bool(&json!([])).is_err());
    }

    #[test]
    fn string_renders_scalars() {
        assert_eq!(to_string(&json!("abc")).unwrap(), "abc");
        assert_eq!(to_string(&json!(12)).unwrap(), "12");
        assert_eq!(to_string(&Value::Null).unwrap(), "");
        assert!(to_string(&json!(["a"])).is_err());
    }

    #[test]
    fn missing_required_key_is_reported_by_name() {
        let o = obj(json!({"name": "x"}));
        let err = int(&o, "id").unwrap_err();
        assert_eq!(
            err,
            MappingError::MissingField {
                field: "id".to_string()
            }
        );
    }

    #[test]
    fn invalid_value_carries_field_name() {
        let o = obj(json!({"price": "free"}));
        let err = float(&o, "price").unwrap_err();
        assert_eq!(err.field(), "price");
    }

    #[test]
    fn list_defaults_to_empty_when_absent_or_null() {
        let o = obj(json!({"images": null}));
        assert!(string_list(&o, "images").unwrap().is_empty());
        assert!(string_list(&o, "missing").unwrap().is_empty());
    }

    #[test]
    fn list_rejects_non_array() {
        let o = obj(json!({"images": "a.jpg"}));
        let err = string_list(&o, "images").unwrap_err();
        assert_eq!(err.field(), "images");
    }

    #[test]
    fn list_error_points_at_element() {
        let o = obj(json!({"images": ["a.jpg", {"url": "b.jpg"}]}));
        let err = string_list(&o, "images").unwrap_err();
        assert_eq!(err.field(), "images[1]");
    }

    #[test]
    fn opaque_copies_anything() {
        let o = obj(json!({"custom": {"deep": [1, "two", null]}}));
        assert_eq!(opaque(&o, "custom"), json!({"deep": [1, "two", null]}));
        assert_eq!(opaque(&o, "absent"), Value::Null);
    }
}
