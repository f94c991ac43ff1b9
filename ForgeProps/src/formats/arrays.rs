//! Index arrays: offsets (`objects_offs.json`), attribute/value pairs
//! (`objects_avs.json`) and the value pool (`objects_vals.json`)

use super::common::read_json_file;
use super::value::PropValue;
use crate::error::{Error, Result};
use std::ops::Range;
use std::path::Path;

/// Per-object start positions into the pair array, in pair units.
///
/// Entry `0` is unused; object ids run from `1` to [`Offsets::max_id`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Offsets(Vec<usize>);

impl Offsets {
    /// Highest object id described by the table.
    #[must_use]
    pub fn max_id(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Whether `id` has an offset entry.
    #[must_use]
    pub fn contains(&self, id: usize) -> bool {
        id < self.0.len()
    }

    /// Range of pair-array entries (two per pair) that belongs to `id`.
    ///
    /// The last object runs to the end of the pair array. Returns `Ok(None)`
    /// when `id` has no offset entry. The range is not checked against
    /// `pairs_len`.
    ///
    /// # Errors
    /// Returns [`Error::PairRangeOutOfBounds`] when an offset is too large to
    /// address entries.
    pub fn entry_range(&self, id: usize, pairs_len: usize) -> Result<Option<Range<usize>>> {
        let Some(&first) = self.0.get(id) else {
            return Ok(None);
        };
        let next = self.0.get(id + 1).copied();

        let start = first.checked_mul(2);
        let end = next.map_or(Some(pairs_len), |n| n.checked_mul(2));
        match (start, end) {
            (Some(start), Some(end)) => Ok(Some(start..end)),
            _ => Err(Error::PairRangeOutOfBounds {
                object_id: id,
                start: first.saturating_mul(2),
                end: next.map_or(pairs_len, |n| n.saturating_mul(2)),
                len: pairs_len,
            }),
        }
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

impl From<Vec<usize>> for Offsets {
    fn from(offsets: Vec<usize>) -> Self {
        Self(offsets)
    }
}

/// Flat `(attribute reference, value index)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeValuePairs(Vec<usize>);

impl AttributeValuePairs {
    /// Pairs stored in `range`, which is expressed in array entries.
    ///
    /// A trailing half pair is not yielded; callers validate even-length ranges.
    pub fn pairs(&self, range: Range<usize>) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0[range].chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Number of array entries (twice the number of pairs).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for AttributeValuePairs {
    fn from(entries: Vec<usize>) -> Self {
        Self(entries)
    }
}

/// The shared pool of scalar values referenced by the pair array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValuePool(Vec<PropValue>);

impl ValuePool {
    /// Value at `index`.
    pub fn get(&self, index: usize) -> Result<&PropValue> {
        self.0.get(index).ok_or(Error::ValueIndexOutOfRange {
            index,
            len: self.0.len(),
        })
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

impl From<Vec<PropValue>> for ValuePool {
    fn from(values: Vec<PropValue>) -> Self {
        Self(values)
    }
}

/// Read the offsets file
///
/// # Errors
/// Returns an error if the file is missing or is not an array of
/// non-negative integers.
pub fn read_offsets<P: AsRef<Path>>(path: P) -> Result<Offsets> {
    read_json_file::<Vec<usize>, _>(path).map(Offsets)
}

/// Read the attribute/value pair file
///
/// # Errors
/// Returns an error if the file is missing or is not an array of
/// non-negative integers.
pub fn read_pairs<P: AsRef<Path>>(path: P) -> Result<AttributeValuePairs> {
    read_json_file::<Vec<usize>, _>(path).map(AttributeValuePairs)
}

/// Read the value pool file
///
/// # Errors
/// Returns an error if the file is missing or holds anything other than
/// strings, numbers, booleans and nulls.
pub fn read_values<P: AsRef<Path>>(path: P) -> Result<ValuePool> {
    read_json_file::<Vec<PropValue>, _>(path).map(ValuePool)
}
