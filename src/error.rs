//! Unified error type for all store operations.

use crate::document::RecordShape;
use std::path::{Path, PathBuf};

/// Things that can go wrong when using a [`DocumentStore`](crate::DocumentStore).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `create` was called for an identifier whose document is already on disk.
    #[error("document `{identifier}` already exists")]
    AlreadyExists {
        /// Identifier of the existing document.
        identifier: String,
    },

    /// The document (or, for a purge, the store root) does not exist.
    #[error("not found: {}", .path.display())]
    NotFound {
        /// Path that was expected to exist.
        path: PathBuf,
    },

    /// A specific field is absent from a mapping document, even after backfill.
    #[error("field `{field}` does not exist in document `{identifier}`")]
    FieldNotFound {
        /// Document that was read.
        identifier: String,
        /// Field that was asked for.
        field: String,
    },

    /// A mapping-only or sequence-only operation was used on the other shape.
    #[error("`{operation}` needs a {expected} store, this store holds {actual} records")]
    WrongShape {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Shape the operation works on.
        expected: RecordShape,
        /// Shape of the store it was called on.
        actual: RecordShape,
    },

    /// The call itself makes no sense for this store (e.g. a field read on a list).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Bad construction input: empty root, root that is a file, malformed config.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// File system problem (write, rename, remove, list).
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        /// Path the failing operation touched.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// Failed to turn a value or document into JSON.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A document file (or a field value) could not be decoded.
    #[error("deserialization error in {}: {message}", .path.display())]
    Deserialize {
        /// File that held the bad content.
        path: PathBuf,
        /// What the decoder complained about.
        message: String,
    },
}

impl Error {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn not_found(path: impl AsRef<Path>) -> Self {
        Error::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub(crate) fn deserialize(path: impl AsRef<Path>, message: impl ToString) -> Self {
        Error::Deserialize {
            path: path.as_ref().to_path_buf(),
            message: message.to_string(),
        }
    }

    /// `true` for [`Error::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
