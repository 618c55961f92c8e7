//! Default-value suppliers for mapping stores.

use serde_json::{Map, Value};

/// Supplies the fields every mapping document should carry.
///
/// Consulted on `create` and on every read, where any field missing from the
/// stored document is backfilled from here.
pub trait DefaultValues: Send + Sync {
    /// Field name to default value.
    fn defaults(&self) -> Map<String, Value>;
}

/// A fixed set of defaults.
impl DefaultValues for Map<String, Value> {
    fn defaults(&self) -> Map<String, Value> {
        self.clone()
    }
}

/// No defaults at all.
impl DefaultValues for () {
    fn defaults(&self) -> Map<String, Value> {
        Map::new()
    }
}

impl<F> DefaultValues for F
where
    F: Fn() -> Map<String, Value> + Send + Sync,
{
    fn defaults(&self) -> Map<String, Value> {
        self()
    }
}
