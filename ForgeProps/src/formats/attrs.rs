//! Attribute definition table (`objects_attrs.json`)
//!
//! The file is a JSON array of rows. A row is either a descriptor array with
//! fixed column positions or a bare number used as padding, which is skipped.
//! Attribute references in the pair array are 1-based positions in the table
//! that remains after padding rows are dropped.

use super::common::{json_kind, loose_bool, nullable_int, nullable_string, read_json_file};
use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

const COL_NAME: usize = 0;
const COL_CATEGORY: usize = 1;
const COL_TYPE: usize = 2;
const COL_UNIT: usize = 3;
const COL_DESCRIPTION: usize = 4;
const COL_DISPLAY_NAME: usize = 5;
const COL_FLAGS: usize = 6;
const COL_DISPLAY_PRECISION: usize = 7;

static MISSING: Value = Value::Null;

/// Category used when a row's category is `null` or missing.
pub const DEFAULT_CATEGORY: &str = "General";
/// Category used when a row's category is the empty string.
pub const BLANK_CATEGORY: &str = "Attribute";

/// One attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    /// Position of the row in the source file (padding rows included).
    pub index: usize,
    /// Attribute name.
    pub name: String,
    /// Normalized category.
    pub category: String,
    /// Declared data type code.
    pub declared_type: Option<i64>,
    /// Unit appended to formatted values.
    pub unit: Option<String>,
    pub description: Option<String>,
    pub display_name: Option<String>,
    /// Hidden/flagged marker from the source.
    pub flagged: bool,
    /// Whether the source asks for precision to be displayed.
    pub shows_precision: bool,
}

impl AttributeDescriptor {
    /// Decode a descriptor from a row array.
    ///
    /// Missing trailing columns read as `null`.
    pub fn from_row(index: usize, row: &[Value]) -> Result<Self> {
        let column = |col: usize| row.get(col).unwrap_or(&MISSING);
        let name = nullable_string(column(COL_NAME))
            .map_err(field_error(index, "name", "string"))?
            .unwrap_or_default();
        let category = normalize_category(
            nullable_string(column(COL_CATEGORY))
                .map_err(field_error(index, "category", "string or null"))?,
        );

        Ok(Self {
            index,
            name,
            category,
            declared_type: nullable_int(column(COL_TYPE))
                .map_err(field_error(index, "type", "number or null"))?,
            unit: nullable_string(column(COL_UNIT))
                .map_err(field_error(index, "unit", "string or null"))?,
            description: nullable_string(column(COL_DESCRIPTION))
                .map_err(field_error(index, "description", "string or null"))?,
            display_name: nullable_string(column(COL_DISPLAY_NAME))
                .map_err(field_error(index, "display_name", "string or null"))?,
            flagged: loose_bool(column(COL_FLAGS))
                .map_err(field_error(index, "flags", "boolean-like"))?,
            shows_precision: loose_bool(column(COL_DISPLAY_PRECISION))
                .map_err(field_error(index, "display_precision", "boolean-like"))?,
        })
    }

    /// `category/name`, the form reserved attributes are matched on.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }
}

fn field_error(
    row: usize,
    column: &'static str,
    expected: &'static str,
) -> impl FnOnce(&'static str) -> Error {
    move |found| Error::InvalidAttributeField {
        row,
        column,
        expected,
        found,
    }
}

fn normalize_category(category: Option<String>) -> String {
    match category {
        None => DEFAULT_CATEGORY.to_string(),
        Some(c) if c.is_empty() => BLANK_CATEGORY.to_string(),
        Some(c) => c,
    }
}

/// The loaded attribute table.
#[derive(Debug, Clone, Default)]
pub struct AttributeTable {
    attributes: Vec<AttributeDescriptor>,
}

impl AttributeTable {
    /// Build the table from already-decoded rows.
    pub fn from_rows(rows: &[Value]) -> Result<Self> {
        let mut attributes = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            match row {
                Value::Number(_) => {} // padding
                Value::Array(columns) => {
                    attributes.push(AttributeDescriptor::from_row(index, columns)?);
                }
                other => {
                    return Err(Error::InvalidAttributeRow {
                        row: index,
                        found: json_kind(other),
                    });
                }
            }
        }

        Ok(Self { attributes })
    }

    /// Look up an attribute by the 1-based reference stored in the pair array.
    ///
    /// This is the only place the 1-based convention is translated.
    pub fn attribute_at(&self, reference: usize) -> Result<&AttributeDescriptor> {
        reference
            .checked_sub(1)
            .and_then(|i| self.attributes.get(i))
            .ok_or(Error::AttributeRefOutOfRange {
                reference,
                len: self.attributes.len(),
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.attributes.iter()
    }
}

impl From<Vec<AttributeDescriptor>> for AttributeTable {
    fn from(attributes: Vec<AttributeDescriptor>) -> Self {
        Self { attributes }
    }
}

/// Read an attribute definition file from disk
///
/// # Errors
/// Returns an error if the file is missing, is not a JSON array, or holds a
/// row that cannot be decoded.
pub fn read_attrs<P: AsRef<Path>>(path: P) -> Result<AttributeTable> {
    let rows: Vec<Value> = read_json_file(path)?;
    AttributeTable::from_rows(&rows)
}

/// Parse attribute definitions from a JSON string
///
/// # Errors
/// Returns an error if the JSON is malformed or a row cannot be decoded.
pub fn parse_attrs(content: &str) -> Result<AttributeTable> {
    let rows: Vec<Value> = serde_json::from_str(content)?;
    AttributeTable::from_rows(&rows)
}
