//! Per-identifier JSON document storage.
//!
//! Every identifier gets its own `<root>/<identifier>.json`. A store holds
//! either mapping records (JSON objects with an `identifier` field and
//! backfilled defaults) or sequence records (JSON arrays).
//!
//! ```rust,no_run
//! use json_docstore::{DocumentStore, RecordShape};
//!
//! let users = DocumentStore::open("data/users", RecordShape::Mapping).unwrap();
//! users.create("alice").unwrap();
//! users.set_field("alice", "email", "alice@example.com").unwrap();
//! let email: String = users.read_field_as("alice", "email").unwrap();
//! assert_eq!(email, "alice@example.com");
//! ```
//!
//! **Single-process only.** Nothing is locked; concurrent writers to the same
//! identifier will lose updates. Serialize access yourself if you need more.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod defaults;
pub mod document;
pub mod error;
pub mod locate;
pub mod persist;
pub mod policy;
pub mod serializer;
pub mod store;

pub use config::StoreConfig;
pub use defaults::DefaultValues;
pub use document::{Document, RecordShape, IDENTIFIER_FIELD};
pub use error::{Error, Result};
pub use locate::{FlatLocator, Locator};
pub use policy::RepairPolicy;
pub use store::{DocumentStore, DocumentStoreBuilder};
