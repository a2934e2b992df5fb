mod common;

use nutritrack::core::activity;
use nutritrack::core::water_cache::{self, WaterCache};

#[test]
fn test_add_writes_through_to_store_and_cache() {
    let (dir, db) = common::setup_with_user();
    let path = dir.path().join("water_cache.json");
    let day = common::date(2026, 5, 1);

    let mut cache = WaterCache::open(&path);
    water_cache::add_water(&db, &mut cache, "alice", day, 300.0, common::SUNDAY).unwrap();
    let reading =
        water_cache::add_water(&db, &mut cache, "alice", day, 200.0, common::SUNDAY).unwrap();
    assert_eq!(reading.water_ml, 500.0);
    assert_eq!(reading.cached_ml, Some(300.0));

    let reopened = WaterCache::open(&path);
    assert_eq!(reopened.get("alice", day), Some(500.0));
    assert_eq!(
        db.get_trend("alice", day).unwrap().unwrap().water_intake,
        500.0
    );
}

#[test]
fn test_read_repairs_diverged_cache_from_store() {
    let (dir, db) = common::setup_with_user();
    let path = dir.path().join("water_cache.json");
    let day = common::date(2026, 5, 1);

    let mut cache = WaterCache::open(&path);
    water_cache::add_water(&db, &mut cache, "alice", day, 400.0, common::SUNDAY).unwrap();
    // a write that bypassed the cache
    activity::log_water(&db, "alice", day, 100.0, common::SUNDAY).unwrap();

    let reading = water_cache::read_water(&db, &mut cache, "alice", day).unwrap();
    assert_eq!(reading.water_ml, 500.0);
    assert_eq!(reading.cached_ml, Some(400.0));
    assert!(reading.reconciled);
    assert_eq!(WaterCache::open(&path).get("alice", day), Some(500.0));

    let again = water_cache::read_water(&db, &mut cache, "alice", day).unwrap();
    assert!(!again.reconciled);
}

#[test]
fn test_read_without_record_is_zero() {
    let (dir, db) = common::setup_with_user();
    let mut cache = WaterCache::open(&dir.path().join("water_cache.json"));
    let reading =
        water_cache::read_water(&db, &mut cache, "alice", common::date(2026, 5, 1)).unwrap();
    assert_eq!(reading.water_ml, 0.0);
    assert_eq!(reading.cached_ml, None);
}

#[test]
fn test_corrupt_cache_file_is_treated_as_empty() {
    let (dir, _db) = common::setup_db();
    let path = dir.path().join("water_cache.json");
    std::fs::write(&path, "{not json").unwrap();
    let cache = WaterCache::open(&path);
    assert_eq!(cache.get("alice", common::date(2026, 5, 1)), None);
}

#[test]
fn test_cache_keys_are_per_user_and_day() {
    let (dir, _db) = common::setup_db();
    let mut cache = WaterCache::open(&dir.path().join("water_cache.json"));
    cache.set("alice", common::date(2026, 5, 1), 100.0);
    assert_eq!(cache.get("bob", common::date(2026, 5, 1)), None);
    assert_eq!(cache.get("alice", common::date(2026, 5, 2)), None);
}
