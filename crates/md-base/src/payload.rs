//! Extraction of the fenced JSON block a model turn may carry.
//!
//! The model is asked to end any turn that changes a subsystem with a
//! ```` ```json ```` block. Only the first such block counts; a turn without
//! one, or with one that does not parse, yields nothing.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?i:json)\b[ \t]*\r?\n?(.*?)```").expect("invalid json fence regex"));

/// Raw text between the first ```` ```json ```` fence and its closing fence.
pub fn find_json_block(text: &str) -> Option<&str> {
    JSON_FENCE.captures(text).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// Parse the first fenced JSON block of a completed turn.
///
/// Malformed JSON is swallowed: the caller only ever sees a value or nothing.
pub fn extract_payload(text: &str) -> Option<Value> {
    let block = find_json_block(text)?;
    match serde_json::from_str::<Value>(block.trim()) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, "discarding malformed json block");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_block_between_narrative() {
        let text = "Voltage is collapsing across the aft ring.\n\
                    ```json\n{\"system\":\"POWER\",\"status\":\"CRITICAL\",\"parameters\":{\"voltage\":220}}\n```\n\
                    Hurry, engineer.";
        assert_eq!(
            extract_payload(text),
            Some(json!({"system": "POWER", "status": "CRITICAL", "parameters": {"voltage": 220}}))
        );
    }

    #[test]
    fn matches_direct_parse() {
        let raw = r#"{"systems":[{"name":"a","status":"ok"}],"n":[1,2.5,null,true]}"#;
        let text = format!("prefix\n```json\n{}\n```", raw);
        let direct: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_payload(&text), Some(direct));
    }

    #[test]
    fn no_block_yields_nothing() {
        assert_eq!(extract_payload("All quiet. {\"system\":\"POWER\",\"status\":\"OK\"}"), None);
        assert_eq!(extract_payload(""), None);
    }

    #[test]
    fn untagged_fence_is_ignored() {
        assert_eq!(extract_payload("```\n{\"a\":1}\n```"), None);
        assert_eq!(extract_payload("```jsonc\n{\"a\":1}\n```"), None);
    }

    #[test]
    fn malformed_block_yields_nothing() {
        assert_eq!(extract_payload("```json\n{\"system\": \"POWER\",\n```"), None);
    }

    #[test]
    fn unterminated_block_yields_nothing() {
        assert_eq!(extract_payload("```json\n{\"system\": \"POWER\"}"), None);
    }

    #[test]
    fn only_first_block_counts() {
        let text = "```json\n{\"first\":true}\n```\nmore\n```json\n{\"second\":true}\n```";
        assert_eq!(extract_payload(text), Some(json!({"first": true})));
    }

    #[test]
    fn malformed_first_block_does_not_fall_through() {
        let text = "```json\nnot json\n```\n```json\n{\"second\":true}\n```";
        assert_eq!(extract_payload(text), None);
    }

    #[test]
    fn tag_is_case_insensitive_and_allows_crlf() {
        assert_eq!(extract_payload("```JSON\r\n{\"a\":1}\r\n```"), Some(json!({"a": 1})));
    }
}
