//! External identifiers (`objects_ids.json`)
//!
//! Ids are hexadecimal strings, but exporters do not quote consistently: the
//! entry for object 0 in particular is usually written as a bare number.
//! Numbers are canonicalized to their base-10 integer form.

use super::common::{json_kind, read_json_file};
use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// One external id per object id, position preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalIds(Vec<String>);

impl ExternalIds {
    /// Decode ids from raw JSON elements.
    pub fn from_values(values: &[Value]) -> Result<Self> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| match value {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n
                    .as_i64()
                    .unwrap_or_else(|| n.as_f64().map_or(0, |f| f as i64))
                    .to_string()),
                other => Err(Error::InvalidExternalId {
                    index,
                    found: json_kind(other),
                }),
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// External id of object `id`.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for ExternalIds {
    fn from(ids: Vec<String>) -> Self {
        Self(ids)
    }
}

/// Read the external id file
///
/// # Errors
/// Returns an error if the file is missing, is not a JSON array, or holds an
/// element that is neither a string nor a number.
pub fn read_ids<P: AsRef<Path>>(path: P) -> Result<ExternalIds> {
    let values: Vec<Value> = read_json_file(path)?;
    ExternalIds::from_values(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mixed_encoding() {
        let ids = ExternalIds::from_values(&[json!(0), json!("a1b2"), json!(17.0), json!("")])
            .unwrap();
        assert_eq!(ids.len(), 4);
        assert_eq!(ids.get(0), Some("0"));
        assert_eq!(ids.get(1), Some("a1b2"));
        assert_eq!(ids.get(2), Some("17"));
        assert_eq!(ids.get(3), Some(""));
        assert_eq!(ids.get(4), None);
    }

    #[test]
    fn test_other_kinds_are_fatal() {
        let err = ExternalIds::from_values(&[json!("a"), json!(null)]).unwrap_err();
        assert!(matches!(err, Error::InvalidExternalId { index: 1, found: "null" }));
    }
}
