//! Property database
//!
//! A property database is a directory of five JSON files exported alongside a
//! model: attribute definitions, per-object offsets, attribute/value pairs, a
//! value pool and external ids. [`PropertyDatabase`] loads all five and
//! resolves each object's effective properties by walking its `instanceof`
//! and `parent` links.
//!
//! # Usage
//!
//! ```no_run
//! use forgeprops::database::PropertyDatabase;
//!
//! let db = PropertyDatabase::open("derivatives/model/properties")?;
//! for object in db.resolve_all()? {
//!     println!("{} {}", object.object_id, object.name);
//! }
//! # Ok::<(), forgeprops::Error>(())
//! ```

mod export;
pub mod markers;
mod resolver;
mod types;

pub use export::{to_json_string, write_json};
pub use markers::Marker;
pub use types::{DatabaseStats, ObjectProperties, PropertyMap};

use crate::config::{ResolverSettings, Settings};
use crate::error::Result;
use crate::formats::{
    AttributeTable, AttributeValuePairs, ExternalIds, Offsets, ValuePool, read_attrs, read_ids,
    read_offsets, read_pairs, read_values,
};

use std::path::{Path, PathBuf};

/// The five loaded tables plus the directory they came from
///
/// All tables are read-only after construction, so a database can be shared
/// across threads while objects are resolved.
#[derive(Debug, Clone)]
pub struct PropertyDatabase {
    attrs: AttributeTable,
    offsets: Offsets,
    pairs: AttributeValuePairs,
    values: ValuePool,
    ids: ExternalIds,
    source_path: PathBuf,
    resolver: ResolverSettings,
}

impl PropertyDatabase {
    /// Load a database from a directory using the default file names
    ///
    /// # Errors
    /// Returns an error if any of the five files is missing or malformed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::open_with(dir, &Settings::default())
    }

    /// Load a database from a directory using the given settings
    ///
    /// # Errors
    /// Returns an error if any of the five files is missing or malformed.
    pub fn open_with<P: AsRef<Path>>(dir: P, settings: &Settings) -> Result<Self> {
        let dir = dir.as_ref();
        tracing::info!("Loading property database from {}", dir.display());

        let paths = settings.files.paths_in(dir);
        let db = Self {
            attrs: read_attrs(&paths.attrs)?,
            offsets: read_offsets(&paths.offsets)?,
            pairs: read_pairs(&paths.pairs)?,
            values: read_values(&paths.values)?,
            ids: read_ids(&paths.ids)?,
            source_path: dir.to_path_buf(),
            resolver: settings.resolver,
        };

        log_stats(&db);
        Ok(db)
    }

    /// Build a database from tables that are already in memory.
    #[must_use]
    pub fn from_parts(
        attrs: AttributeTable,
        offsets: Offsets,
        pairs: AttributeValuePairs,
        values: ValuePool,
        ids: ExternalIds,
    ) -> Self {
        Self {
            attrs,
            offsets,
            pairs,
            values,
            ids,
            source_path: PathBuf::new(),
            resolver: ResolverSettings::default(),
        }
    }

    /// Replace the resolver settings.
    #[must_use]
    pub fn with_resolver_settings(mut self, resolver: ResolverSettings) -> Self {
        self.resolver = resolver;
        self
    }

    /// Change the object id at which parent chains stop.
    #[must_use]
    pub fn with_root_id(mut self, root_id: usize) -> Self {
        self.resolver.root_id = root_id;
        self
    }

    /// Resolve on the rayon pool in [`PropertyDatabase::resolve_all`].
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.resolver.parallel = parallel;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn attributes(&self) -> &AttributeTable {
        &self.attrs
    }

    #[must_use]
    pub fn offsets(&self) -> &Offsets {
        &self.offsets
    }

    #[must_use]
    pub fn pairs(&self) -> &AttributeValuePairs {
        &self.pairs
    }

    #[must_use]
    pub fn values(&self) -> &ValuePool {
        &self.values
    }

    #[must_use]
    pub fn external_ids(&self) -> &ExternalIds {
        &self.ids
    }

    /// Directory the tables were loaded from (empty for in-memory databases).
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    #[must_use]
    pub fn resolver_settings(&self) -> ResolverSettings {
        self.resolver
    }

    /// Highest object id.
    #[must_use]
    pub fn max_id(&self) -> usize {
        self.offsets.max_id()
    }

    /// Get database statistics
    #[must_use]
    pub fn stats(&self) -> DatabaseStats {
        DatabaseStats {
            attribute_count: self.attrs.len(),
            object_count: self.offsets.max_id(),
            pair_count: self.pairs.len() / 2,
            value_count: self.values.len(),
            external_id_count: self.ids.len(),
        }
    }
}

/// Log database statistics
fn log_stats(db: &PropertyDatabase) {
    let stats = db.stats();
    tracing::info!(
        "Loaded database: {} attributes, {} objects, {} pairs, {} values, {} ids",
        stats.attribute_count,
        stats.object_count,
        stats.pair_count,
        stats.value_count,
        stats.external_id_count
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{PropValue, parse_attrs};
    use pretty_assertions::assert_eq;

    fn door_database() -> PropertyDatabase {
        PropertyDatabase::from_parts(
            parse_attrs(r#"[0, ["name", "__name__", 20, null, null, null, 0]]"#).unwrap(),
            Offsets::from(vec![0, 0, 0]),
            AttributeValuePairs::from(vec![1, 0]),
            ValuePool::from(vec![PropValue::from("Door")]),
            ExternalIds::from(vec![String::new(), "a".to_string(), "b".to_string()]),
        )
    }

    #[test]
    fn test_accessors() {
        let db = door_database();
        assert_eq!(db.attributes().len(), 1);
        assert_eq!(db.offsets().max_id(), 2);
        assert_eq!(db.pairs().len(), 2);
        assert_eq!(db.values().get(0).unwrap(), &PropValue::from("Door"));
        assert_eq!(db.external_ids().get(2), Some("b"));
        assert_eq!(db.source_path(), Path::new(""));
        assert_eq!(db.max_id(), 2);
        assert_eq!(
            db.stats(),
            DatabaseStats {
                attribute_count: 1,
                object_count: 2,
                pair_count: 1,
                value_count: 1,
                external_id_count: 3,
            }
        );
    }

    #[test]
    fn test_resolver_settings_builders() {
        let db = door_database();
        assert_eq!(db.resolver_settings(), ResolverSettings::default());

        let custom = ResolverSettings {
            root_id: 7,
            parallel: true,
        };
        let db = db.with_resolver_settings(custom);
        assert_eq!(db.resolver_settings(), custom);

        let db = db.with_root_id(3).with_parallel(false);
        assert_eq!(
            db.resolver_settings(),
            ResolverSettings {
                root_id: 3,
                parallel: false,
            }
        );
    }
}
