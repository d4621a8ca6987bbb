//! Response Interpreter — reads `CandidateFields` out of a free-form model reply.
//!
//! Never fails: a reply that does not decode to a JSON object degrades to a
//! description-only result carrying the reply verbatim.

use serde_json::{Map, Value};
use tracing::warn;

use crate::models::event::CandidateFields;

const FIELD_CUSTOMER_NAME: &str = "customer_name";
const FIELD_DATETIME: &str = "datetime";
const FIELD_DESCRIPTION: &str = "description";

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Interprets a raw model reply.
pub fn interpret_reply(reply: &str) -> CandidateFields {
    let content = extract_fenced_block(reply).trim();

    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => from_object(map),
        Ok(_) => {
            warn!("Model reply is JSON but not an object, using it as description");
            degrade_to_description(reply)
        }
        Err(e) => {
            warn!("Model reply is not valid JSON ({e}), using it as description");
            degrade_to_description(reply)
        }
    }
}

/// Returns the content between the first pair of ``` fences (optionally tagged `json`),
/// or the whole input when no fence is present.
pub fn extract_fenced_block(text: &str) -> &str {
    let (start, marker) = match text.find(JSON_FENCE) {
        Some(idx) => (idx, JSON_FENCE),
        None => match text.find(FENCE) {
            Some(idx) => (idx, FENCE),
            None => return text,
        },
    };

    let inner = &text[start + marker.len()..];
    match inner.find(FENCE) {
        Some(end) => &inner[..end],
        None => inner,
    }
}

fn from_object(map: Map<String, Value>) -> CandidateFields {
    CandidateFields {
        customer_name: string_field(&map, FIELD_CUSTOMER_NAME),
        datetime: string_field(&map, FIELD_DATETIME),
        description: string_field(&map, FIELD_DESCRIPTION),
        raw: map,
    }
}

/// Missing, null, non-string and blank values all read as absent.
fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn degrade_to_description(reply: &str) -> CandidateFields {
    let mut raw = Map::new();
    raw.insert(FIELD_CUSTOMER_NAME.to_string(), Value::Null);
    raw.insert(FIELD_DATETIME.to_string(), Value::Null);
    raw.insert(FIELD_DESCRIPTION.to_string(), Value::String(reply.to_string()));

    CandidateFields {
        customer_name: None,
        datetime: None,
        description: Some(reply.to_string()),
        raw,
    }
}
