//! Path-naming strategies.
//!
//! Implement [`Locator`] (or pass a closure) to change where documents live
//! under the store root. The store creates missing parent directories on
//! write, so nested layouts work without further changes.

use std::path::{Path, PathBuf};

/// File extension used by [`FlatLocator`].
pub const EXTENSION: &str = "json";

/// Maps an identifier to the file that holds its document.
///
/// Must be pure: the same root and identifier always give the same path,
/// otherwise `exists`, `read` and `delete` stop agreeing with each other.
pub trait Locator: Send + Sync {
    /// Path of the document file for `identifier` beneath `root`.
    fn locate(&self, root: &Path, identifier: &str) -> PathBuf;
}

/// Default layout: `<root>/<identifier>.json`, everything in one directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatLocator;

impl Locator for FlatLocator {
    fn locate(&self, root: &Path, identifier: &str) -> PathBuf {
        root.join(format!("{identifier}.{EXTENSION}"))
    }
}

impl<F> Locator for F
where
    F: Fn(&Path, &str) -> PathBuf + Send + Sync,
{
    fn locate(&self, root: &Path, identifier: &str) -> PathBuf {
        self(root, identifier)
    }
}
