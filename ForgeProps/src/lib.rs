//! # ForgeProps
//!
//! Decoder for columnar object-property databases, the `objects_*.json`
//! tables exported next to a model for its property viewer.
//!
//! The five tables describe every object as a run of attribute/value pairs.
//! Objects inherit from each other through `instanceof` and `parent` links;
//! this crate walks those links and produces one flat, categorized property
//! map per named object.
//!
//! ## Quick Start
//!
//! ```no_run
//! use forgeprops::prelude::*;
//!
//! let db = PropertyDatabase::open("properties/")?;
//! let json = db.export_json(&ExportSettings::default())?;
//! println!("{json}");
//! # Ok::<(), forgeprops::Error>(())
//! ```
//!
//! Settings (file names, root object, output formatting) can be loaded from a
//! TOML file, see [`config::Settings`].
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `forgeprops` command-line binary

pub mod config;
pub mod database;
pub mod error;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::{ExportSettings, ResolverSettings, Settings};
    pub use crate::database::{DatabaseStats, ObjectProperties, PropertyDatabase};
    pub use crate::error::{Error, Result};
    pub use crate::formats::{AttributeDescriptor, PropValue};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
