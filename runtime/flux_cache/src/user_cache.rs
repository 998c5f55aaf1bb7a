//! The developer-facing scratch cache.

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::Mutex;
use serde::Serialize;

use flux_any::{make_any_result, AnyResult, FieldValue, Fingerprint};

use crate::errors::CacheError;

/// Whether an entry survives pruning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheTag {
    /// The entry stays until the cache is reset.
    #[default]
    Permanent,
    /// The entry is dropped by the next `prune`.
    Temporary,
}

/// A store for data a module wants back after it has run.
///
/// Keys are arbitrary serializable objects (use a tuple for compound keys);
/// they are fingerprinted on the way in. The `*_hash` variants accept a
/// ready-made fingerprint and skip rehashing. Values are held type-erased;
/// retrieval names the expected type.
///
/// The cache is shared by every call to the same module, so a module that
/// mutates it concurrently from several top-level calls must tolerate the
/// interleaving (the store itself is internally synchronized).
#[derive(Default)]
pub struct UserCache {
    inner: Mutex<Entries>,
}

#[derive(Default)]
struct Entries {
    data: BTreeMap<Fingerprint, AnyResult>,
    temporary: BTreeSet<Fingerprint>,
}

impl UserCache {
    pub fn new() -> Self {
        UserCache::default()
    }

    /// Is anything stored under `key`?
    pub fn contains<K: Serialize + ?Sized>(&self, key: &K) -> Result<bool, CacheError> {
        Ok(self.contains_hash(&Fingerprint::of(key)?))
    }

    /// `contains` when the fingerprint is already known.
    pub fn contains_hash(&self, key: &Fingerprint) -> bool {
        self.inner.lock().data.contains_key(key)
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn cache<K, V>(&self, key: &K, value: V, tag: CacheTag) -> Result<(), CacheError>
    where
        K: Serialize + ?Sized,
        V: FieldValue,
    {
        self.cache_hash(Fingerprint::of(key)?, value, tag);
        Ok(())
    }

    /// `cache` when the fingerprint is already known.
    pub fn cache_hash<V: FieldValue>(&self, key: Fingerprint, value: V, tag: CacheTag) {
        let mut inner = self.inner.lock();
        inner.data.insert(key, make_any_result(value));
        match tag {
            CacheTag::Temporary => {
                inner.temporary.insert(key);
            }
            CacheTag::Permanent => {
                inner.temporary.remove(&key);
            }
        }
    }

    /// Retrieves the entry under `key`. Fails with `Miss` when absent and
    /// with a cast error when the stored value is not a `V`.
    pub fn uncache<V, K>(&self, key: &K) -> Result<V, CacheError>
    where
        K: Serialize + ?Sized,
        V: Clone + 'static,
    {
        self.uncache_hash(&Fingerprint::of(key)?)
    }

    /// `uncache` when the fingerprint is already known.
    pub fn uncache_hash<V: Clone + 'static>(&self, key: &Fingerprint) -> Result<V, CacheError> {
        let inner = self.inner.lock();
        let entry = inner.data.get(key).ok_or(CacheError::Miss { key: *key })?;
        Ok(entry.cast::<V>()?)
    }

    /// Retrieves the entry under `key`, or `default` when absent.
    pub fn uncache_or<V, K>(&self, key: &K, default: V) -> Result<V, CacheError>
    where
        K: Serialize + ?Sized,
        V: Clone + 'static,
    {
        let key = Fingerprint::of(key)?;
        match self.uncache_hash(&key) {
            Err(CacheError::Miss { .. }) => Ok(default),
            other => other,
        }
    }

    /// Tags the entry under `key` as temporary.
    pub fn set_temporary(&self, key: &Fingerprint) {
        self.inner.lock().temporary.insert(*key);
    }

    /// Tags the entry under `key` as permanent.
    pub fn set_permanent(&self, key: &Fingerprint) {
        self.inner.lock().temporary.remove(key);
    }

    /// Drops every entry currently tagged temporary.
    pub fn prune(&self) {
        let mut inner = self.inner.lock();
        let temporary = std::mem::take(&mut inner.temporary);
        for key in &temporary {
            inner.data.remove(key);
        }
    }

    /// Drops everything.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.data.clear();
        inner.temporary.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().data.is_empty()
    }
}

impl std::fmt::Debug for UserCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("UserCache")
            .field("entries", &inner.data.len())
            .field("temporary", &inner.temporary.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
