//! Status discovery over an arbitrary JSON payload.
//!
//! The model is free to shape its JSON however it likes, so the walk sniffs
//! for status-bearing objects at any depth:
//! - `{ "system": .., "status": .. }` (preferred) or `{ "name": .., "status": .. }`
//!   yields one update,
//! - a `systems` array has each element visited,
//! - every nested object value is visited.
//!
//! Arrays anywhere else are not entered. Results are folded last-write-wins.

use serde_json::{Map, Value};

use crate::status::StatusStore;

/// One (subsystem, status) pair found in a payload, already upper-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub key: String,
    pub status: String,
}

impl StatusUpdate {
    pub fn new(key: &str, status: &str) -> Self {
        Self { key: key.trim().to_uppercase(), status: status.trim().to_uppercase() }
    }
}

/// Walk `value` depth-first and collect every status update it carries, in
/// visiting order.
pub fn collect_status_updates(value: &Value) -> Vec<StatusUpdate> {
    let mut out = Vec::new();
    match value {
        Value::Object(map) => visit_object(map, &mut out),
        // A bare top-level list is treated like a `systems` list.
        Value::Array(items) => visit_elements(items, &mut out),
        _ => {}
    }
    out
}

/// Fold every update found in `value` into the store (persisted immediately).
/// Returns the number of updates applied.
pub fn apply_payload(value: &Value, store: &mut StatusStore) -> usize {
    let updates = collect_status_updates(value);
    let count = updates.len();
    if count > 0 {
        store.apply(updates);
    }
    count
}

fn visit_elements(items: &[Value], out: &mut Vec<StatusUpdate>) {
    for item in items {
        if let Value::Object(map) = item {
            visit_object(map, out);
        }
    }
}

fn visit_object(map: &Map<String, Value>, out: &mut Vec<StatusUpdate>) {
    if let Some(update) = status_pair(map) {
        out.push(update);
    }

    if let Some(Value::Array(items)) = map.get("systems") {
        visit_elements(items, out);
    }

    for child in map.values() {
        if let Value::Object(nested) = child {
            visit_object(nested, out);
        }
    }
}

fn status_pair(map: &Map<String, Value>) -> Option<StatusUpdate> {
    let status = map.get("status").and_then(scalar_text)?;
    let key = ["system", "name"].iter().find_map(|field| map.get(*field).and_then(identifier))?;
    Some(StatusUpdate::new(key, &status))
}

fn identifier(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::MemoryKvStore;
    use serde_json::json;

    fn keys(updates: &[StatusUpdate]) -> Vec<(&str, &str)> {
        updates.iter().map(|u| (u.key.as_str(), u.status.as_str())).collect()
    }

    #[test]
    fn system_status_pair_at_root() {
        let v = json!({"system": "power", "status": "critical", "parameters": {"voltage": 220}});
        assert_eq!(keys(&collect_status_updates(&v)), vec![("POWER", "CRITICAL")]);
    }

    #[test]
    fn name_is_fallback_identifier() {
        let v = json!({"name": "Life Support", "status": "Degraded"});
        assert_eq!(keys(&collect_status_updates(&v)), vec![("LIFE SUPPORT", "DEGRADED")]);
    }

    #[test]
    fn system_wins_over_name() {
        let v = json!({"system": "POWER", "name": "Reactor bus", "status": "STABLE"});
        assert_eq!(keys(&collect_status_updates(&v)), vec![("POWER", "STABLE")]);
    }

    #[test]
    fn systems_array_elements_are_visited() {
        let v = json!({"systems": [
            {"system": "PROPULSION", "status": "CRITICAL"},
            {"name": "power", "status": "stable"},
            "noise",
            42
        ]});
        assert_eq!(keys(&collect_status_updates(&v)), vec![("PROPULSION", "CRITICAL"), ("POWER", "STABLE")]);
    }

    #[test]
    fn deeply_nested_objects_are_found() {
        let v = json!({"report": {"deck": {"bay": {"unit": {"system": "hull", "status": "breached"}}}}});
        assert_eq!(keys(&collect_status_updates(&v)), vec![("HULL", "BREACHED")]);
    }

    #[test]
    fn other_arrays_are_not_entered() {
        let v = json!({"log": [{"system": "POWER", "status": "OK"}]});
        assert!(collect_status_updates(&v).is_empty());
    }

    #[test]
    fn top_level_array_is_visited() {
        let v = json!([{"system": "POWER", "status": "OK"}, [{"system": "X", "status": "Y"}]]);
        assert_eq!(keys(&collect_status_updates(&v)), vec![("POWER", "OK")]);
    }

    #[test]
    fn nodes_without_fields_are_skipped() {
        let v = json!({"status": "CRITICAL", "inner": {"system": "POWER"}, "empty": {"system": "", "status": "X"}});
        assert!(collect_status_updates(&v).is_empty());
        assert!(collect_status_updates(&json!("POWER")).is_empty());
        assert!(collect_status_updates(&Value::Null).is_empty());
    }

    #[test]
    fn scalar_status_values_are_stringified() {
        let v = json!({"systems": [{"system": "shields", "status": 40}, {"system": "comms", "status": true}]});
        assert_eq!(keys(&collect_status_updates(&v)), vec![("SHIELDS", "40"), ("COMMS", "TRUE")]);
    }

    #[test]
    fn apply_payload_is_last_write_wins() {
        let mut store = StatusStore::load(Box::new(MemoryKvStore::new()));
        let v = json!({"systems": [
            {"system": "POWER", "status": "DEGRADED"},
            {"system": "power", "status": "resolved"}
        ]});
        assert_eq!(apply_payload(&v, &mut store), 2);
        assert_eq!(store.get("POWER"), Some("RESOLVED"));
    }

    #[test]
    fn apply_payload_without_updates_touches_nothing() {
        let mut store = StatusStore::load(Box::new(MemoryKvStore::new()));
        let before = store.map().clone();
        assert_eq!(apply_payload(&json!({"parameters": {"voltage": 1}}), &mut store), 0);
        assert_eq!(store.map(), &before);
    }
}
