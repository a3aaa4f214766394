use super::*;

#[test]
fn defaults_hold_three_subsystems() {
    let map = default_status_map();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("PROPULSION").map(String::as_str), Some("CRITICAL"));
    assert!(map.contains_key("LIFE_SUPPORT"));
    assert!(map.contains_key("POWER"));
}

#[test]
fn empty_storage_loads_defaults() {
    let kv = MemoryKvStore::new();
    assert_eq!(load_status_map(&kv), default_status_map());
}

#[test]
fn stored_values_override_defaults() {
    let kv = MemoryKvStore::new();
    kv.put_raw(STATUS_KEY, r#"{"power":"resolved","HULL":"BREACHED"}"#);
    let map = load_status_map(&kv);
    assert_eq!(map.get("POWER").map(String::as_str), Some("RESOLVED"));
    assert_eq!(map.get("HULL").map(String::as_str), Some("BREACHED"));
    assert_eq!(map.get("PROPULSION").map(String::as_str), Some("CRITICAL"));
}

#[test]
fn corrupt_storage_loads_defaults() {
    let kv = MemoryKvStore::new();
    kv.put_raw(STATUS_KEY, "{not json");
    assert_eq!(load_status_map(&kv), default_status_map());

    kv.put_raw(STATUS_KEY, r#"["POWER"]"#);
    assert_eq!(load_status_map(&kv), default_status_map());
}

#[test]
fn unreadable_storage_loads_defaults() {
    let kv = MemoryKvStore::failing_reads();
    assert_eq!(load_status_map(&kv), default_status_map());
}

#[test]
fn save_then_load_round_trips_over_defaults() {
    let mut kv = MemoryKvStore::new();
    let mut m = StatusMap::new();
    m.insert("POWER".to_string(), "STABLE".to_string());
    m.insert("SENSORS".to_string(), "OFFLINE".to_string());
    save_status_map(&mut kv, &m);

    let mut expected = default_status_map();
    expected.extend(m);
    assert_eq!(load_status_map(&kv), expected);
}

#[test]
fn failed_write_is_swallowed() {
    let mut store = StatusStore::load(Box::new(MemoryKvStore::failing_writes()));
    store.set("power", "ok");
    assert_eq!(store.get("POWER"), Some("OK"));
}

#[test]
fn apply_persists_immediately() {
    let kv = MemoryKvStore::new();
    let mut store = StatusStore::load(Box::new(kv.clone()));
    store.apply([StatusUpdate::new("propulsion", "resolved")]);

    let raw = kv.raw(STATUS_KEY).expect("status written");
    let stored: StatusMap = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.get("PROPULSION").map(String::as_str), Some("RESOLVED"));
    assert_eq!(stored.len(), 3);
}

#[test]
fn status_outlives_store_instance() {
    let kv = MemoryKvStore::new();
    {
        let mut first = StatusStore::load(Box::new(kv.clone()));
        first.set("LIFE_SUPPORT", "STABLE");
    }
    let second = StatusStore::load(Box::new(kv));
    assert_eq!(second.get("life_support"), Some("STABLE"));
}

#[test]
fn file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut kv = FileKvStore::new(dir.path().join("store"));
    assert!(kv.get(STATUS_KEY).unwrap().is_none());

    kv.set(STATUS_KEY, r#"{"POWER":"OK"}"#).unwrap();
    assert_eq!(kv.get(STATUS_KEY).unwrap().as_deref(), Some(r#"{"POWER":"OK"}"#));
    assert!(!dir.path().join("store").join("ship_status.json.tmp").exists());

    let store = StatusStore::load(Box::new(kv));
    assert_eq!(store.get("POWER"), Some("OK"));
}

#[test]
fn file_store_unreadable_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the value file should be makes the read fail.
    std::fs::create_dir_all(dir.path().join("ship_status.json")).unwrap();
    let kv = FileKvStore::new(dir.path());
    assert!(kv.get(STATUS_KEY).is_err());
    assert_eq!(load_status_map(&kv), default_status_map());
}
