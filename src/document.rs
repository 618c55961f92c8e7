//! Record shapes and the in-memory form of one stored document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Reserved mapping field that always carries the document's identifier.
pub const IDENTIFIER_FIELD: &str = "identifier";

/// Which kind of record a store holds. One store, one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordShape {
    /// Keyed field mapping (a JSON object). Gets default backfill on read.
    #[default]
    #[serde(alias = "dict")]
    Mapping,
    /// Ordered list of values (a JSON array). Stored and returned verbatim.
    #[serde(alias = "list")]
    Sequence,
}

impl fmt::Display for RecordShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordShape::Mapping => f.write_str("mapping"),
            RecordShape::Sequence => f.write_str("sequence"),
        }
    }
}

/// Content of one document file.
///
/// Serialized untagged, so a mapping is a plain JSON object and a sequence a
/// plain JSON array on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Document {
    /// Field name to value.
    Mapping(Map<String, Value>),
    /// Values in insertion order.
    Sequence(Vec<Value>),
}

impl Document {
    /// Shape of this document.
    #[must_use]
    pub fn shape(&self) -> RecordShape {
        match self {
            Document::Mapping(_) => RecordShape::Mapping,
            Document::Sequence(_) => RecordShape::Sequence,
        }
    }

    /// Borrow the mapping, if this is one.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            Document::Mapping(map) => Some(map),
            Document::Sequence(_) => None,
        }
    }

    /// Borrow the sequence, if this is one.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Document::Sequence(items) => Some(items),
            Document::Mapping(_) => None,
        }
    }

    /// Take the mapping out, if this is one.
    #[must_use]
    pub fn into_mapping(self) -> Option<Map<String, Value>> {
        match self {
            Document::Mapping(map) => Some(map),
            Document::Sequence(_) => None,
        }
    }

    /// Take the sequence out, if this is one.
    #[must_use]
    pub fn into_sequence(self) -> Option<Vec<Value>> {
        match self {
            Document::Sequence(items) => Some(items),
            Document::Mapping(_) => None,
        }
    }

    /// Field lookup on a mapping. Always `None` for sequences.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(field))
    }

    /// An empty document of the given shape. Mappings start with just the
    /// identifier field.
    pub(crate) fn fresh(shape: RecordShape, identifier: &str) -> Self {
        match shape {
            RecordShape::Mapping => {
                let mut map = Map::new();
                map.insert(IDENTIFIER_FIELD.to_owned(), Value::from(identifier));
                Document::Mapping(map)
            }
            RecordShape::Sequence => Document::Sequence(Vec::new()),
        }
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Document::Mapping(map)
    }
}

impl From<Vec<Value>> for Document {
    fn from(items: Vec<Value>) -> Self {
        Document::Sequence(items)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        match doc {
            Document::Mapping(map) => Value::Object(map),
            Document::Sequence(items) => Value::Array(items),
        }
    }
}
