//! Core store type and builder.

use crate::config::StoreConfig;
use crate::defaults::DefaultValues;
use crate::document::{Document, RecordShape, IDENTIFIER_FIELD};
use crate::error::{Error, Result};
use crate::locate::{FlatLocator, Locator};
use crate::persist::{atomic_write, load, remove};
use crate::policy::RepairPolicy;
use crate::serializer::{JsonSerializer, Serializer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// One JSON file per identifier under a root directory.
///
/// A store holds exactly one [`RecordShape`]. Mapping stores backfill their
/// configured defaults (and the `identifier` field) on every read and persist
/// the result; sequence stores return what is on disk untouched.
///
/// Single-process, single-writer. Nothing here locks: two writers on the same
/// identifier can lose each other's updates.
pub struct DocumentStore {
    root: PathBuf,
    shape: RecordShape,
    defaults: Box<dyn DefaultValues>,
    locator: Box<dyn Locator>,
    serializer: JsonSerializer,
    repair: RepairPolicy,
}

impl DocumentStore {
    /// Open (or create) a store at `root` with the given shape, no defaults,
    /// flat layout and pretty JSON.
    pub fn open(root: impl AsRef<Path>, shape: RecordShape) -> Result<Self> {
        Self::builder(root).shape(shape).build()
    }

    /// Shorthand for `open(root, RecordShape::Mapping)`.
    pub fn mapping(root: impl AsRef<Path>) -> Result<Self> {
        Self::open(root, RecordShape::Mapping)
    }

    /// Shorthand for `open(root, RecordShape::Sequence)`.
    pub fn sequence(root: impl AsRef<Path>) -> Result<Self> {
        Self::open(root, RecordShape::Sequence)
    }

    /// Start configuring a new store. Call [`.build()`](DocumentStoreBuilder::build)
    /// when ready.
    pub fn builder(root: impl AsRef<Path>) -> DocumentStoreBuilder {
        DocumentStoreBuilder::new(root)
    }

    /// Open a store from a parsed [`StoreConfig`].
    pub fn from_config(config: StoreConfig) -> Result<Self> {
        Self::builder(&config.root)
            .shape(config.shape)
            .defaults(config.defaults)
            .pretty(config.pretty)
            .repair(config.repair)
            .build()
    }

    // ---- accessors ----

    /// Directory the documents live in.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Record shape of this store.
    #[must_use]
    pub fn shape(&self) -> RecordShape {
        self.shape
    }

    /// Repair-write policy for mapping reads.
    #[must_use]
    pub fn repair_policy(&self) -> RepairPolicy {
        self.repair
    }

    // ---- reads ----

    /// File path for `identifier`. Pure; the file need not exist.
    #[must_use]
    pub fn locate(&self, identifier: &str) -> PathBuf {
        let path = self.locator.locate(&self.root, identifier);
        trace!(identifier, path = %path.display(), "located document");
        path
    }

    /// `true` iff the document file exists and is a regular file.
    #[must_use]
    pub fn exists(&self, identifier: &str) -> bool {
        self.locate(identifier).is_file()
    }

    /// Load a document.
    ///
    /// Mapping documents come back with every default field and the
    /// `identifier` field present; under [`RepairPolicy::Always`] that view is
    /// written back to disk on every call.
    pub fn read(&self, identifier: &str) -> Result<Document> {
        let path = self.existing(identifier)?;
        match (self.shape, load(&path, &self.serializer)?) {
            (RecordShape::Mapping, Document::Mapping(map)) => self.repair(identifier, &path, map),
            (RecordShape::Sequence, doc @ Document::Sequence(_)) => {
                trace!(identifier, "read sequence document");
                Ok(doc)
            }
            (expected, found) => Err(Error::deserialize(
                &path,
                format!("expected a {expected} document, found a {}", found.shape()),
            )),
        }
    }

    /// Read one field of a mapping document (after backfill).
    ///
    /// Fails with [`Error::InvalidOperation`] on a sequence store and with
    /// [`Error::FieldNotFound`] when neither the document nor the defaults
    /// have the field.
    pub fn read_field(&self, identifier: &str, field: &str) -> Result<Value> {
        if self.shape == RecordShape::Sequence {
            return Err(Error::InvalidOperation(format!(
                "field `{field}` requested from sequence document `{identifier}`"
            )));
        }
        let mut map = self.read_mapping(identifier)?;
        map.remove(field).ok_or_else(|| Error::FieldNotFound {
            identifier: identifier.to_owned(),
            field: field.to_owned(),
        })
    }

    /// Like [`read_field`](Self::read_field) but decodes the value into `T`.
    pub fn read_field_as<T: DeserializeOwned>(&self, identifier: &str, field: &str) -> Result<T> {
        let value = self.read_field(identifier, field)?;
        serde_json::from_value(value).map_err(|e| {
            Error::deserialize(self.locate(identifier), format!("field `{field}`: {e}"))
        })
    }

    /// Read a mapping document as its field map.
    pub fn read_mapping(&self, identifier: &str) -> Result<Map<String, Value>> {
        self.expect_shape("read_mapping", RecordShape::Mapping)?;
        self.read(identifier)?
            .into_mapping()
            .ok_or_else(|| self.wrong_shape("read_mapping", RecordShape::Mapping))
    }

    /// Read a sequence document as its list of values.
    pub fn read_sequence(&self, identifier: &str) -> Result<Vec<Value>> {
        self.expect_shape("read_sequence", RecordShape::Sequence)?;
        self.read(identifier)?
            .into_sequence()
            .ok_or_else(|| self.wrong_shape("read_sequence", RecordShape::Sequence))
    }

    // ---- writes ----

    /// Create a fresh document. Mappings start as `{identifier}` plus the
    /// configured defaults, sequences as `[]`.
    pub fn create(&self, identifier: &str) -> Result<()> {
        let path = self.locate(identifier);
        if path.is_file() {
            return Err(Error::AlreadyExists {
                identifier: identifier.to_owned(),
            });
        }
        let mut doc = Document::fresh(self.shape, identifier);
        if let Document::Mapping(map) = &mut doc {
            for (field, value) in self.defaults.defaults() {
                map.entry(field).or_insert(value);
            }
        }
        self.write(&path, &doc)?;
        debug!(identifier, shape = %self.shape, "created document");
        Ok(())
    }

    /// Set `field` to `value` on a mapping document and persist it.
    ///
    /// Goes through [`read`](Self::read), so backfill applies first.
    pub fn set_field<V: Serialize>(&self, identifier: &str, field: &str, value: V) -> Result<()> {
        self.expect_shape("set_field", RecordShape::Mapping)?;
        let value = serde_json::to_value(value)?;
        let mut map = self.read_mapping(identifier)?;
        map.insert(field.to_owned(), value);
        self.write(&self.locate(identifier), &Document::Mapping(map))?;
        debug!(identifier, field, "set field");
        Ok(())
    }

    /// Append `value` to the end of a sequence document. Duplicates are fine.
    pub fn append_item<V: Serialize>(&self, identifier: &str, value: V) -> Result<()> {
        self.expect_shape("append_item", RecordShape::Sequence)?;
        let value = serde_json::to_value(value)?;
        let mut items = self.read_sequence(identifier)?;
        items.push(value);
        let len = items.len();
        self.write(&self.locate(identifier), &Document::Sequence(items))?;
        debug!(identifier, len, "appended item");
        Ok(())
    }

    /// Delete one document.
    pub fn delete(&self, identifier: &str) -> Result<()> {
        let path = self.existing(identifier)?;
        remove(&path)?;
        debug!(identifier, "deleted document");
        Ok(())
    }

    /// Delete every file directly under the root, then the root itself.
    ///
    /// Subdirectories are only removed when empty; a populated one fails the
    /// purge with [`Error::Io`]. Not transactional: a failure midway leaves
    /// whatever was already removed gone.
    pub fn purge_all(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(Error::not_found(&self.root));
        }
        warn!(root = %self.root.display(), "purging document store");

        let entries = std::fs::read_dir(&self.root).map_err(|e| Error::io(&self.root, e))?;
        for entry in entries {
            let path = entry.map_err(|e| Error::io(&self.root, e))?.path();
            if path.is_file() {
                std::fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
            } else if path.is_dir() {
                std::fs::remove_dir(&path).map_err(|e| Error::io(&path, e))?;
            }
        }
        std::fs::remove_dir(&self.root).map_err(|e| Error::io(&self.root, e))?;
        Ok(())
    }

    // ---- internal ----

    fn existing(&self, identifier: &str) -> Result<PathBuf> {
        let path = self.locate(identifier);
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::not_found(path))
        }
    }

    fn expect_shape(&self, operation: &'static str, expected: RecordShape) -> Result<()> {
        if self.shape == expected {
            Ok(())
        } else {
            Err(self.wrong_shape(operation, expected))
        }
    }

    fn wrong_shape(&self, operation: &'static str, expected: RecordShape) -> Error {
        Error::WrongShape {
            operation,
            expected,
            actual: self.shape,
        }
    }

    /// Backfill defaults and the identifier field, then write back per the
    /// repair policy.
    fn repair(&self, identifier: &str, path: &Path, mut map: Map<String, Value>) -> Result<Document> {
        let before = map.len();
        for (field, value) in self.defaults.defaults() {
            if field != IDENTIFIER_FIELD {
                map.entry(field).or_insert(value);
            }
        }
        map.entry(IDENTIFIER_FIELD)
            .or_insert_with(|| Value::from(identifier));
        let added = map.len() - before;

        let doc = Document::Mapping(map);
        if self.repair.should_write(added > 0) {
            self.write(path, &doc)?;
            if added > 0 {
                debug!(identifier, added, "repaired document");
            }
        }
        Ok(doc)
    }

    fn write(&self, path: &Path, doc: &Document) -> Result<()> {
        let bytes = self.serializer.serialize(doc)?;
        atomic_write(path, &bytes)
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("root", &self.root)
            .field("shape", &self.shape)
            .field("repair", &self.repair)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and opens a [`DocumentStore`].
///
/// ```rust,no_run
/// use json_docstore::{DocumentStore, RecordShape};
/// use serde_json::{json, Map};
///
/// let defaults: Map<_, _> = json!({ "score": 0, "active": true })
///     .as_object()
///     .cloned()
///     .unwrap();
/// let users = DocumentStore::builder("data/users")
///     .shape(RecordShape::Mapping)
///     .defaults(defaults)
///     .build()
///     .unwrap();
/// ```
pub struct DocumentStoreBuilder {
    root: PathBuf,
    shape: RecordShape,
    defaults: Box<dyn DefaultValues>,
    locator: Box<dyn Locator>,
    pretty: bool,
    repair: RepairPolicy,
}

impl DocumentStoreBuilder {
    fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            shape: RecordShape::Mapping,
            defaults: Box::new(()),
            locator: Box::new(FlatLocator),
            pretty: true,
            repair: RepairPolicy::Always,
        }
    }

    /// Record shape (default: [`RecordShape::Mapping`]).
    pub fn shape(mut self, shape: RecordShape) -> Self {
        self.shape = shape;
        self
    }

    /// Default-value supplier for mapping documents (default: none).
    pub fn defaults(mut self, defaults: impl DefaultValues + 'static) -> Self {
        self.defaults = Box::new(defaults);
        self
    }

    /// Path-naming strategy (default: [`FlatLocator`]).
    pub fn locator(mut self, locator: impl Locator + 'static) -> Self {
        self.locator = Box::new(locator);
        self
    }

    /// Indented JSON (default) or single-line.
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Repair-write policy (default: [`RepairPolicy::Always`]).
    pub fn repair(mut self, policy: RepairPolicy) -> Self {
        self.repair = policy;
        self
    }

    /// Validate, create the root directory if needed, and return the store.
    pub fn build(self) -> Result<DocumentStore> {
        if self.root.as_os_str().is_empty() {
            return Err(Error::InvalidConfiguration(
                "root path must not be empty".into(),
            ));
        }
        if self.root.exists() && !self.root.is_dir() {
            return Err(Error::InvalidConfiguration(format!(
                "root {} exists and is not a directory",
                self.root.display()
            )));
        }
        if self.shape == RecordShape::Sequence && !self.defaults.defaults().is_empty() {
            return Err(Error::InvalidConfiguration(
                "default values only apply to mapping stores".into(),
            ));
        }

        if !self.root.is_dir() {
            std::fs::create_dir_all(&self.root).map_err(|e| Error::io(&self.root, e))?;
            info!(root = %self.root.display(), "created store root");
        }

        let serializer = if self.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::compact()
        };

        Ok(DocumentStore {
            root: self.root,
            shape: self.shape,
            defaults: self.defaults,
            locator: self.locator,
            serializer,
            repair: self.repair,
        })
    }
}

impl std::fmt::Debug for DocumentStoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStoreBuilder")
            .field("root", &self.root)
            .field("shape", &self.shape)
            .field("pretty", &self.pretty)
            .field("repair", &self.repair)
            .finish_non_exhaustive()
    }
}
