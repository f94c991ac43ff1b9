//! Shared JSON reading and coercion helpers
//!
//! The property tables are loosely typed: numbers are always JSON floats,
//! optional columns may be `null`, and boolean-like columns show up as
//! numbers, strings or real booleans depending on the exporter. The helpers
//! here fold those encodings into Rust types and report the offending JSON
//! kind when a value cannot be coerced.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Coercion outcome: the converted value, or the JSON kind that was rejected.
pub type Coerced<T> = std::result::Result<T, &'static str>;

/// Human-readable name of a JSON value's kind, used in error messages.
#[must_use]
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read a whole JSON file and decode it into `T`
///
/// # Errors
/// Returns [`Error::MissingFile`] when the path does not exist and
/// [`Error::MalformedFile`] when the content does not decode into `T`.
pub fn read_json_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    tracing::debug!("Read {} ({} bytes)", path.display(), content.len());

    serde_json::from_str(&content).map_err(|source| Error::MalformedFile {
        path: path.to_path_buf(),
        source,
    })
}

/// `null` becomes `None`, strings pass through.
pub fn nullable_string(value: &Value) -> Coerced<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Err(json_kind(other)),
    }
}

/// `null` becomes `None`, numbers are truncated to integers.
pub fn nullable_int(value: &Value) -> Coerced<Option<i64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))),
        other => Err(json_kind(other)),
    }
}

/// Boolean-like flag column.
///
/// Numbers are true when positive, strings when non-empty, `null` is false.
pub fn loose_bool(value: &Value) -> Coerced<bool> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f > 0.0)),
        Value::String(s) => Ok(!s.is_empty()),
        other => Err(json_kind(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nullable_string() {
        assert_eq!(nullable_string(&json!(null)), Ok(None));
        assert_eq!(nullable_string(&json!("mm")), Ok(Some("mm".to_string())));
        assert_eq!(nullable_string(&json!(3)), Err("number"));
    }

    #[test]
    fn test_nullable_int_truncates_floats() {
        assert_eq!(nullable_int(&json!(20)), Ok(Some(20)));
        assert_eq!(nullable_int(&json!(20.9)), Ok(Some(20)));
        assert_eq!(nullable_int(&json!(null)), Ok(None));
        assert_eq!(nullable_int(&json!("20")), Err("string"));
    }

    #[test]
    fn test_loose_bool() {
        assert_eq!(loose_bool(&json!(1)), Ok(true));
        assert_eq!(loose_bool(&json!(0)), Ok(false));
        assert_eq!(loose_bool(&json!(-2)), Ok(false));
        assert_eq!(loose_bool(&json!("x")), Ok(true));
        assert_eq!(loose_bool(&json!("")), Ok(false));
        assert_eq!(loose_bool(&json!(true)), Ok(true));
        assert_eq!(loose_bool(&json!(null)), Ok(false));
        assert_eq!(loose_bool(&json!([1])), Err("array"));
        assert_eq!(loose_bool(&json!({})), Err("object"));
    }

    #[test]
    fn test_read_json_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json_file::<Vec<usize>, _>(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::MissingFile { .. }));
    }

    #[test]
    fn test_read_json_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offs.json");
        std::fs::write(&path, "[0, 1, \"two\"]").unwrap();
        let err = read_json_file::<Vec<usize>, _>(&path).unwrap_err();
        assert!(matches!(err, Error::MalformedFile { .. }));
    }
}
