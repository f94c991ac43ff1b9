//! Reserved attributes
//!
//! A handful of `category/name` keys carry structure instead of displayable
//! data: inheritance links, the object name, and bookkeeping the viewer uses.

use crate::formats::AttributeDescriptor;

pub const PARENT: &str = "__parent__/parent";
pub const NAME: &str = "__name__/name";
pub const INSTANCE_OF: &str = "__instanceof__/instanceof_objid";
pub const VIEWABLE_IN: &str = "__viewable_in__/viewable_in";
pub const CHILD: &str = "__child__/child";
pub const NODE_FLAGS: &str = "__node_flags__/node_flags";
pub const DOC_SCHEMA_NAME: &str = "__document__/schema_name";
pub const DOC_SCHEMA_VERSION: &str = "__document__/schema_version";
pub const IS_DOC_PROPERTY: &str = "__document__/is_doc_property";

/// Declared type codes that mark a string attribute.
pub const STRING_TYPES: [i64; 2] = [20, 21];

/// How the resolver treats an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Next hop of the parent chain.
    Parent,
    /// Object whose properties are merged in place.
    InstanceOf,
    /// Object display name (only for string-typed name attributes).
    Name,
    /// Bookkeeping that is never shown.
    Structural,
    /// Ordinary displayable property.
    Property,
}

impl Marker {
    /// Classify an attribute by its `category/name` key and declared type.
    #[must_use]
    pub fn of(attr: &AttributeDescriptor) -> Self {
        match attr.key().as_str() {
            PARENT => Marker::Parent,
            INSTANCE_OF => Marker::InstanceOf,
            VIEWABLE_IN | CHILD | NODE_FLAGS | DOC_SCHEMA_NAME | DOC_SCHEMA_VERSION
            | IS_DOC_PROPERTY => Marker::Structural,
            NAME if attr
                .declared_type
                .is_some_and(|t| STRING_TYPES.contains(&t)) =>
            {
                Marker::Name
            }
            _ => Marker::Property,
        }
    }
}
