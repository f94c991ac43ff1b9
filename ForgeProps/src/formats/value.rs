//! Value pool entries
//!
//! The pool is a JSON array of scalars. Every JSON number is kept as
//! [`PropValue::Float`] because the exporter that writes these files has a
//! single number type; [`PropValue::Integer`] is only produced by callers that
//! build values in code.

use serde::de::{self, Deserialize, Deserializer, Visitor};
use std::fmt;

/// A single scalar from the value pool.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// JSON `null`.
    Null,
    /// JSON `true` / `false`.
    Bool(bool),
    /// An integer built in code.
    Integer(i64),
    /// Any JSON number.
    Float(f64),
    /// JSON string.
    String(String),
}

impl PropValue {
    /// Kind name used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            PropValue::Null => "null",
            PropValue::Bool(_) => "boolean",
            PropValue::Integer(_) => "integer",
            PropValue::Float(_) => "number",
            PropValue::String(_) => "string",
        }
    }

    /// The string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret the value as an object id (numbers only, fractions truncated).
    #[must_use]
    pub fn as_object_id(&self) -> Option<i64> {
        match self {
            PropValue::Integer(i) => Some(*i),
            PropValue::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    /// Display string for the value, followed by ` unit` when a unit is given.
    ///
    /// The unit is appended whatever the value kind, so a boolean with a unit
    /// renders as `"Yes mm"` and a null as `" mm"`.
    #[must_use]
    pub fn format_with_unit(&self, unit: Option<&str>) -> String {
        match unit {
            Some(unit) => format!("{self} {unit}"),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => Ok(()),
            PropValue::Bool(true) => f.write_str("Yes"),
            PropValue::Bool(false) => f.write_str("No"),
            PropValue::Integer(i) => write!(f, "{i}"),
            PropValue::Float(v) => write!(f, "{v:.6}"),
            PropValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::String(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::String(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Integer(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl<'de> Deserialize<'de> for PropValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PropValueVisitor;

        impl Visitor<'_> for PropValueVisitor {
            type Value = PropValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, number, boolean or null")
            }

            fn visit_unit<E: de::Error>(self) -> Result<PropValue, E> {
                Ok(PropValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<PropValue, E> {
                Ok(PropValue::Null)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<PropValue, E> {
                Ok(PropValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<PropValue, E> {
                Ok(PropValue::Float(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<PropValue, E> {
                Ok(PropValue::Float(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<PropValue, E> {
                Ok(PropValue::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<PropValue, E> {
                Ok(PropValue::String(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<PropValue, E> {
                Ok(PropValue::String(v))
            }
        }

        deserializer.deserialize_any(PropValueVisitor)
    }
}
