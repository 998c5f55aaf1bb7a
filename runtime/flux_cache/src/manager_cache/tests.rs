use super::*;
use crate::user_cache::CacheTag;
use flux_any::Fingerprint;

#[test]
fn same_key_vends_the_same_cache() {
    let caches = ModuleManagerCache::new();
    let a = caches.module_cache("rectangle");
    let b = caches.module_cache("rectangle");
    assert!(Arc::ptr_eq(&a, &b));

    let c = caches.user_cache("rectangle");
    let d = caches.user_cache("rectangle");
    assert!(Arc::ptr_eq(&c, &d));
}

#[test]
fn different_keys_vend_different_caches() {
    let caches = ModuleManagerCache::new();
    let a = caches.module_cache("rectangle");
    let b = caches.module_cache("prism");
    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn module_and_user_caches_are_independent_stores() {
    let caches = ModuleManagerCache::new();
    let user = caches.user_cache("rectangle");
    user.cache("x", 1_i32, CacheTag::Permanent).unwrap();
    assert!(caches.module_cache("rectangle").is_empty());
}

#[test]
fn vended_caches_outlive_reregistration() {
    let caches = ModuleManagerCache::new();
    let before = caches.user_cache("rectangle");
    before.cache("x", 1_i32, CacheTag::Permanent).unwrap();
    // A later request for the same key sees the same contents.
    let after = caches.user_cache("rectangle");
    assert_eq!(after.uncache_or("x", 0_i32).unwrap(), 1);
}

#[test]
fn reset_clears_every_vended_cache() {
    let caches = ModuleManagerCache::new();
    let user = caches.user_cache("rectangle");
    user.cache("x", 1_i32, CacheTag::Permanent).unwrap();
    let module = caches.module_cache("rectangle");
    module.store(Fingerprint::of(&1_u8).unwrap(), flux_fields::ResultMap::new());
    caches.reset();
    assert!(user.is_empty());
    assert!(module.is_empty());
}
