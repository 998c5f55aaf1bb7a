use super::*;
use pretty_assertions::assert_eq;

#[test]
fn cache_then_uncache_round_trips() {
    let cache = UserCache::new();
    cache.cache("intermediate", vec![1, 2, 3], CacheTag::Permanent).unwrap();
    assert!(cache.contains("intermediate").unwrap());
    assert_eq!(
        cache.uncache::<Vec<i32>, _>("intermediate").unwrap(),
        vec![1, 2, 3]
    );
}

#[test]
fn tuple_keys_distinguish_entries() {
    let cache = UserCache::new();
    cache.cache(&("grid", 10_u32), 1.0_f64, CacheTag::Permanent).unwrap();
    cache.cache(&("grid", 20_u32), 2.0_f64, CacheTag::Permanent).unwrap();
    assert_eq!(cache.uncache::<f64, _>(&("grid", 10_u32)).unwrap(), 1.0);
    assert_eq!(cache.uncache::<f64, _>(&("grid", 20_u32)).unwrap(), 2.0);
}

#[test]
fn missing_key_without_default_is_a_miss() {
    let cache = UserCache::new();
    assert!(matches!(
        cache.uncache::<i32, _>("absent"),
        Err(CacheError::Miss { .. })
    ));
}

#[test]
fn missing_key_with_default_returns_the_default() {
    let cache = UserCache::new();
    assert_eq!(cache.uncache_or("absent", 7_i32).unwrap(), 7);
    cache.cache("absent", 9_i32, CacheTag::Permanent).unwrap();
    assert_eq!(cache.uncache_or("absent", 7_i32).unwrap(), 9);
}

#[test]
fn wrong_value_type_is_a_cast_error() {
    let cache = UserCache::new();
    cache.cache("x", 1_i32, CacheTag::Permanent).unwrap();
    assert!(matches!(
        cache.uncache::<f64, _>("x"),
        Err(CacheError::Any(_))
    ));
}

#[test]
fn hash_variants_skip_rehashing() {
    let cache = UserCache::new();
    let key = Fingerprint::of("state").unwrap();
    cache.cache_hash(key, 5_u8, CacheTag::Permanent);
    assert!(cache.contains_hash(&key));
    assert_eq!(cache.uncache_hash::<u8>(&key).unwrap(), 5);
}

#[test]
fn prune_drops_only_temporary_entries() {
    let cache = UserCache::new();
    cache.cache("keep", 1_i32, CacheTag::Permanent).unwrap();
    cache.cache("drop", 2_i32, CacheTag::Temporary).unwrap();
    cache.prune();
    assert!(cache.contains("keep").unwrap());
    assert!(!cache.contains("drop").unwrap());
    assert_eq!(cache.len(), 1);
}

#[test]
fn retagging_moves_entries_between_sets() {
    let cache = UserCache::new();
    let keep = Fingerprint::of("keep").unwrap();
    let drop = Fingerprint::of("drop").unwrap();
    cache.cache_hash(keep, 1_i32, CacheTag::Temporary);
    cache.cache_hash(drop, 2_i32, CacheTag::Permanent);
    cache.set_permanent(&keep);
    cache.set_temporary(&drop);
    cache.prune();
    assert!(cache.contains_hash(&keep));
    assert!(!cache.contains_hash(&drop));
}

#[test]
fn recaching_as_permanent_clears_the_temporary_tag() {
    let cache = UserCache::new();
    cache.cache("x", 1_i32, CacheTag::Temporary).unwrap();
    cache.cache("x", 2_i32, CacheTag::Permanent).unwrap();
    cache.prune();
    assert_eq!(cache.uncache::<i32, _>("x").unwrap(), 2);
}

#[test]
fn reset_drops_everything() {
    let cache = UserCache::new();
    cache.cache("a", 1_i32, CacheTag::Permanent).unwrap();
    cache.cache("b", 2_i32, CacheTag::Temporary).unwrap();
    cache.reset();
    assert!(cache.is_empty());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_serializable_key_round_trips(key in any::<(u64, String)>(), value in any::<i64>()) {
            let cache = UserCache::new();
            cache.cache(&key, value, CacheTag::Permanent).unwrap();
            prop_assert_eq!(cache.uncache::<i64, _>(&key).unwrap(), value);
        }
    }
}
