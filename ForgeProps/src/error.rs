//! Error types for `ForgeProps`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `ForgeProps` operations.
///
/// Every variant is fatal for the decode: a property database whose tables
/// disagree with each other cannot be partially trusted. Objects that simply
/// lack a name or an offset entry are not errors, they are left out of the
/// resolved output.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// One of the database files does not exist.
    #[error("database file not found: {path}")]
    MissingFile {
        /// The expected path of the file.
        path: PathBuf,
    },

    /// A database file is not valid JSON or does not have the expected shape.
    #[error("malformed database file {path}: {source}")]
    MalformedFile {
        /// The file that failed to decode.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    // ==================== Attribute Table Errors ====================
    /// A row of the attribute table is neither a descriptor array nor a
    /// placeholder number.
    #[error("attribute row {row} is not an array (found {found})")]
    InvalidAttributeRow {
        /// Position of the row in the file.
        row: usize,
        /// JSON kind that was found instead.
        found: &'static str,
    },

    /// A column of an attribute row holds a value of the wrong kind.
    #[error("attribute row {row}, column {column}: expected {expected}, found {found}")]
    InvalidAttributeField {
        /// Position of the row in the file.
        row: usize,
        /// Column name.
        column: &'static str,
        /// What the column must contain.
        expected: &'static str,
        /// JSON kind that was found instead.
        found: &'static str,
    },

    // ==================== Index Array Errors ====================
    /// An external id entry is neither a string nor a number.
    #[error("external id {index} must be a string or a number, found {found}")]
    InvalidExternalId {
        /// Position in the ids file.
        index: usize,
        /// JSON kind that was found instead.
        found: &'static str,
    },

    /// An attribute reference in the pair array does not name a loaded attribute.
    #[error("attribute reference {reference} out of range (table has {len} attributes)")]
    AttributeRefOutOfRange {
        /// The 1-based reference as stored in the pair array.
        reference: usize,
        /// Number of attributes in the table.
        len: usize,
    },

    /// A value reference in the pair array is past the end of the value pool.
    #[error("value index {index} out of range (pool has {len} values)")]
    ValueIndexOutOfRange {
        /// The 0-based value index.
        index: usize,
        /// Number of values in the pool.
        len: usize,
    },

    /// An object's pair range does not fit inside the pair array.
    #[error("object {object_id}: pair range {start}..{end} exceeds {len} pair entries")]
    PairRangeOutOfBounds {
        /// Object whose range is broken.
        object_id: usize,
        /// Inclusive start (in array entries, not pairs).
        start: usize,
        /// Exclusive end (in array entries, not pairs).
        end: usize,
        /// Length of the pair array.
        len: usize,
    },

    /// The id table is shorter than the offsets table.
    #[error("object {object_id} has no external id (id table has {len} entries)")]
    ExternalIdOutOfRange {
        /// The object whose id is missing.
        object_id: usize,
        /// Number of entries in the id table.
        len: usize,
    },

    // ==================== Resolution Errors ====================
    /// A value has the wrong kind for the reserved attribute that points at it.
    #[error("object {object_id}: attribute {key} expects {expected}, found {found}")]
    UnexpectedValueType {
        /// Object being read when the mismatch was found.
        object_id: usize,
        /// `category/name` of the attribute.
        key: String,
        /// What the attribute requires.
        expected: &'static str,
        /// Kind of value that was found.
        found: &'static str,
    },

    /// Following parent links returned to an object already on the chain.
    #[error("parent cycle while resolving object {object_id}: object {repeated} visited twice")]
    ParentCycle {
        /// Object being resolved.
        object_id: usize,
        /// First object seen twice.
        repeated: usize,
    },

    /// An instance-of link points back at an object currently being read.
    #[error("instance-of cycle while resolving object {object_id}: object {repeated} references itself")]
    InstanceOfCycle {
        /// Object being resolved.
        object_id: usize,
        /// Object that closed the cycle.
        repeated: usize,
    },

    // ==================== Configuration Errors ====================
    /// Settings file could not be parsed.
    #[error("invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    // ==================== Serialization Errors ====================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// UTF-8 conversion error.
    #[error("UTF-8 error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

/// A specialized Result type for `ForgeProps` operations.
pub type Result<T> = std::result::Result<T, Error>;
