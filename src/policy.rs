//! Repair-write policy for mapping reads.

use serde::{Deserialize, Serialize};

/// Controls when a mapping read writes its backfilled view back to disk.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairPolicy {
    /// Rewrite the file on every read, even when nothing was missing.
    #[default]
    Always,
    /// Only rewrite when backfill actually added a field. Saves one write per
    /// read on healthy documents.
    WhenChanged,
}

impl RepairPolicy {
    pub(crate) fn should_write(self, changed: bool) -> bool {
        match self {
            RepairPolicy::Always => true,
            RepairPolicy::WhenChanged => changed,
        }
    }
}
