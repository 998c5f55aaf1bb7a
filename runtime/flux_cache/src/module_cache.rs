//! The result-memoization store.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use tracing::trace;

use flux_any::Fingerprint;
use flux_fields::ResultMap;

/// Memoized results of one module, keyed by call fingerprint.
///
/// The runtime probes this store before dispatching a module call and
/// writes back on the miss path. Result maps clone cheaply (result values
/// are shared), so a hit hands back an independent map without copying the
/// underlying data.
#[derive(Default)]
pub struct ModuleCache {
    entries: Mutex<BTreeMap<Fingerprint, ResultMap>>,
}

impl ModuleCache {
    pub fn new() -> Self {
        ModuleCache::default()
    }

    pub fn contains(&self, key: &Fingerprint) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// The memoized result map under `key`, if any.
    pub fn fetch(&self, key: &Fingerprint) -> Option<ResultMap> {
        let hit = self.entries.lock().get(key).cloned();
        trace!(%key, hit = hit.is_some(), "module cache probe");
        hit
    }

    /// Memoizes `results` under `key`, replacing any previous entry.
    pub fn store(&self, key: Fingerprint, results: ResultMap) {
        trace!(%key, "module cache store");
        self.entries.lock().insert(key, results);
    }

    /// Drops every memoized result.
    pub fn reset(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl std::fmt::Debug for ModuleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleCache")
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
