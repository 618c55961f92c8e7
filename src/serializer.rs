//! Serialization layer. JSON via serde_json.
//!
//! Implement [`Serializer`] if you need a different byte layout; the store
//! only needs a lossless round-trip.

use crate::document::Document;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

const INDENT: &[u8] = b"    ";

/// Converts documents to/from bytes for persistence.
pub trait Serializer: Send + Sync {
    /// Encode a document to bytes.
    fn serialize(&self, doc: &Document) -> Result<Vec<u8>>;

    /// Decode bytes back into a document. The error is a human-readable
    /// message; the caller attaches the file path.
    fn deserialize(&self, bytes: &[u8]) -> std::result::Result<Document, String>;
}

/// JSON serializer. Pretty-printed with 4-space indentation unless built
/// with [`compact`](Self::compact).
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    pretty: bool,
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::pretty()
    }
}

impl JsonSerializer {
    /// Pretty-printed JSON, four spaces per level.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Compact JSON (single line, no extra whitespace).
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// `true` when output is indented.
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Serializer for JsonSerializer {
    fn serialize(&self, doc: &Document) -> Result<Vec<u8>> {
        if !self.pretty {
            return serde_json::to_vec(doc).map_err(Error::from);
        }
        let mut out = Vec::with_capacity(128);
        let mut ser =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
        doc.serialize(&mut ser)?;
        Ok(out)
    }

    fn deserialize(&self, bytes: &[u8]) -> std::result::Result<Document, String> {
        serde_json::from_slice(bytes).map_err(|e| e.to_string())
    }
}
