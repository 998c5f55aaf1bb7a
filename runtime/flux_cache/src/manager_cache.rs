//! Per-module cache vending.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::module_cache::ModuleCache;
use crate::user_cache::UserCache;

/// Owns every cache the manager hands out: one `ModuleCache` (result
/// memoization) and one `UserCache` (developer scratch) per registered
/// module key, created lazily on first request.
///
/// Erasing a module does not drop its caches; results already handed out
/// may still be referenced, and a re-registration under the same key picks
/// the caches back up.
#[derive(Default)]
pub struct ModuleManagerCache {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    module: FxHashMap<String, Arc<ModuleCache>>,
    user: FxHashMap<String, Arc<UserCache>>,
}

impl ModuleManagerCache {
    pub fn new() -> Self {
        ModuleManagerCache::default()
    }

    /// The result-memoization cache for `key`, created on first use.
    pub fn module_cache(&self, key: &str) -> Arc<ModuleCache> {
        let mut inner = self.inner.lock();
        Arc::clone(
            inner
                .module
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(ModuleCache::new())),
        )
    }

    /// The developer scratch cache for `key`, created on first use.
    pub fn user_cache(&self, key: &str) -> Arc<UserCache> {
        let mut inner = self.inner.lock();
        Arc::clone(
            inner
                .user
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(UserCache::new())),
        )
    }

    /// Drops every vended cache's contents.
    pub fn reset(&self) {
        let inner = self.inner.lock();
        for cache in inner.module.values() {
            cache.reset();
        }
        for cache in inner.user.values() {
            cache.reset();
        }
    }
}

impl std::fmt::Debug for ModuleManagerCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ModuleManagerCache")
            .field("module_caches", &inner.module.len())
            .field("user_caches", &inner.user.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
