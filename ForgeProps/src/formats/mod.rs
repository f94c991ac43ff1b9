//! Readers for the five `objects_*.json` files of a property database
//!
//! Each reader decodes one file into an immutable table. No cross-table
//! checks happen here; references between tables are validated lazily by the
//! resolver when they are followed.

pub mod arrays;
pub mod attrs;
pub mod common;
pub mod ids;
pub mod value;

pub use arrays::{AttributeValuePairs, Offsets, ValuePool, read_offsets, read_pairs, read_values};
pub use attrs::{AttributeDescriptor, AttributeTable, parse_attrs, read_attrs};
pub use ids::{ExternalIds, read_ids};
pub use value::PropValue;
