//! Settings for loading, resolving and exporting (forgeprops.toml)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Conventional root ("universe") object. Parent chains stop when they reach it.
pub const DEFAULT_ROOT_ID: usize = 1;

fn default_attrs() -> String {
    "objects_attrs.json".to_string()
}

fn default_offsets() -> String {
    "objects_offs.json".to_string()
}

fn default_pairs() -> String {
    "objects_avs.json".to_string()
}

fn default_values() -> String {
    "objects_vals.json".to_string()
}

fn default_ids() -> String {
    "objects_ids.json".to_string()
}

fn default_root_id() -> usize {
    DEFAULT_ROOT_ID
}

fn default_true() -> bool {
    true
}

fn default_indent() -> usize {
    2
}

/// Full settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub files: FileNames,
    #[serde(default)]
    pub resolver: ResolverSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file is missing or is not valid settings TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingFile {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!("Loading settings from {}", path.display());
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}

/// Names of the five database files inside the input directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNames {
    #[serde(default = "default_attrs")]
    pub attrs: String,
    #[serde(default = "default_offsets")]
    pub offsets: String,
    #[serde(default = "default_pairs")]
    pub pairs: String,
    #[serde(default = "default_values")]
    pub values: String,
    #[serde(default = "default_ids")]
    pub ids: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            attrs: default_attrs(),
            offsets: default_offsets(),
            pairs: default_pairs(),
            values: default_values(),
            ids: default_ids(),
        }
    }
}

impl FileNames {
    /// Full paths of the five files inside `dir`.
    #[must_use]
    pub fn paths_in(&self, dir: &Path) -> DatabasePaths {
        DatabasePaths {
            attrs: dir.join(&self.attrs),
            offsets: dir.join(&self.offsets),
            pairs: dir.join(&self.pairs),
            values: dir.join(&self.values),
            ids: dir.join(&self.ids),
        }
    }
}

/// Resolved locations of the database files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabasePaths {
    pub attrs: PathBuf,
    pub offsets: PathBuf,
    pub pairs: PathBuf,
    pub values: PathBuf,
    pub ids: PathBuf,
}

/// Inheritance resolution options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Object id at which parent chains stop.
    #[serde(default = "default_root_id")]
    pub root_id: usize,
    /// Resolve objects on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            root_id: DEFAULT_ROOT_ID,
            parallel: false,
        }
    }
}

/// JSON output formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Pretty-print instead of compact output.
    #[serde(default = "default_true")]
    pub pretty: bool,
    /// Spaces per indentation level when pretty-printing.
    #[serde(default = "default_indent")]
    pub indent: usize,
    /// Written at the start of every pretty-printed line after the first.
    #[serde(default)]
    pub prefix: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: default_indent(),
            prefix: String::new(),
        }
    }
}

impl ExportSettings {
    /// Compact, single-line output.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }

    /// Pretty output with `indent` spaces per level.
    #[must_use]
    pub fn pretty(indent: usize) -> Self {
        Self {
            pretty: true,
            indent,
            prefix: String::new(),
        }
    }

    /// Set the line prefix used in pretty output.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}
