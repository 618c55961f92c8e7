//! Declarative store configuration, loadable from JSON.
//!
//! ```rust
//! use json_docstore::{RecordShape, StoreConfig};
//!
//! let cfg = StoreConfig::from_json(r#"{
//!     "root": "data/users",
//!     "shape": "dict",
//!     "defaults": { "theme": "dark", "visits": 0 }
//! }"#).unwrap();
//! assert_eq!(cfg.shape, RecordShape::Mapping);
//! assert!(cfg.pretty);
//! ```

use crate::document::RecordShape;
use crate::error::{Error, Result};
use crate::policy::RepairPolicy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Everything needed to open a [`DocumentStore`](crate::DocumentStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory that holds the documents. Created on open if missing.
    pub root: PathBuf,
    /// Record shape of every document in this store.
    pub shape: RecordShape,
    /// Mapping-only field defaults.
    #[serde(default)]
    pub defaults: Map<String, Value>,
    /// Indent files (default) or write them on one line.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    /// When mapping reads write their backfilled view back.
    #[serde(default)]
    pub repair: RepairPolicy,
}

fn default_pretty() -> bool {
    true
}

impl StoreConfig {
    /// Minimal config: a root and a shape, everything else default.
    pub fn new(root: impl AsRef<Path>, shape: RecordShape) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            shape,
            defaults: Map::new(),
            pretty: true,
            repair: RepairPolicy::Always,
        }
    }

    /// Parse a JSON config. Anything malformed, including a root that isn't a
    /// string, is [`Error::InvalidConfiguration`].
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidConfiguration(e.to_string()))
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&text)
    }
}
