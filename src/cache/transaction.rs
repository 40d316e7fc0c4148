use super::key::CacheKey;
use super::layer::CacheEntry;

/// A tagged mutation transaction: the affected cache keys and their
/// pre-mutation snapshots. `None` records that the key had no entry, so a
/// rollback removes whatever appeared in the meantime.
pub struct MutationTxn {
    label: &'static str,
    snapshots: Vec<(CacheKey, Option<CacheEntry>)>,
}

impl MutationTxn {
    pub(super) fn new(label: &'static str, snapshots: Vec<(CacheKey, Option<CacheEntry>)>) -> Self {
        Self { label, snapshots }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub(super) fn snapshots(&self) -> &[(CacheKey, Option<CacheEntry>)] {
        &self.snapshots
    }

    pub(super) fn into_snapshots(self) -> Vec<(CacheKey, Option<CacheEntry>)> {
        self.snapshots
    }
}
