//! Tolerant decoding of free-form model output.
//!
//! Models are asked for JSON but routinely wrap it in markdown fences or
//! chatty prose. Decoding tries, in order:
//!
//! 1. the whole text as JSON
//! 2. the interior of each triple-backtick fence (optionally tagged `json`)
//! 3. the span from the first `{` to the last `}`
//!
//! Only objects and arrays count as structured values. When every step fails
//! the result is `None`; nothing here panics or returns a partial parse.
//! Decoding says nothing about whether the value has the fields a caller
//! expects - that is the job of [`crate::shape`].

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

lazy_static! {
    static ref FENCED_BLOCK: Regex =
        Regex::new(r"(?s)```(?i:json)?[ \t]*\r?\n?(.*?)```").unwrap();
}

/// Decode the first structured value found in `raw`.
pub fn decode(raw: &str) -> Option<Value> {
    parse_direct(raw)
        .or_else(|| parse_fenced(raw))
        .or_else(|| parse_braced(raw))
}

/// Decode and deserialize into `T` in one step.
///
/// Returns `None` when no structured value is found or it does not
/// deserialize into `T`.
pub fn decode_as<T: DeserializeOwned>(raw: &str) -> Option<T> {
    decode(raw).and_then(|value| serde_json::from_value(value).ok())
}

fn parse_direct(raw: &str) -> Option<Value> {
    parse_structured(raw)
}

fn parse_fenced(raw: &str) -> Option<Value> {
    FENCED_BLOCK
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .find_map(|body| parse_structured(body.as_str()))
}

fn parse_braced(raw: &str) -> Option<Value> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    raw.get(start..=end).and_then(parse_structured)
}

fn parse_structured(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text.trim())
        .ok()
        .filter(|value| value.is_object() || value.is_array())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_direct_json() {
        let value = decode(r#"{"dishName": "Poha", "calories": 250}"#).unwrap();
        assert_eq!(value["dishName"], "Poha");
    }

    #[test]
    fn test_fenced_json_with_tag() {
        let raw = "Here you go:\n```json\n{\"dishName\": \"Test\"}\n```\nEnjoy!";
        assert_eq!(decode(raw).unwrap(), json!({"dishName": "Test"}));
    }

    #[test]
    fn test_fenced_json_without_tag() {
        let raw = "```\n{\"items\": [\"Rice\", \"Dal\"]}\n```";
        assert_eq!(decode(raw).unwrap(), json!({"items": ["Rice", "Dal"]}));
    }

    #[test]
    fn test_fenced_uppercase_tag() {
        let raw = "```JSON\n{\"a\": 1}\n```";
        assert_eq!(decode(raw).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_second_fence_used_when_first_is_not_json() {
        let raw = "```\nnot json\n```\nand\n```json\n{\"a\": 2}\n```";
        assert_eq!(decode(raw).unwrap(), json!({"a": 2}));
    }

    #[test]
    fn test_object_embedded_in_prose() {
        let raw = r#"here is your answer: {"reply": "eat more dal"} hope it helps"#;
        assert_eq!(decode(raw).unwrap(), json!({"reply": "eat more dal"}));
    }

    #[test]
    fn test_foreign_fence_tag_falls_through_to_braces() {
        let raw = "```javascript\n{\"a\": 3}\n```";
        assert_eq!(decode(raw).unwrap(), json!({"a": 3}));
    }

    #[test]
    fn test_not_json_is_none() {
        assert!(decode("not json at all").is_none());
        assert!(decode("").is_none());
        assert!(decode("} backwards {").is_none());
    }

    #[test]
    fn test_scalars_are_not_structured() {
        assert!(decode("42").is_none());
        assert!(decode("\"just a string\"").is_none());
        assert!(decode("true").is_none());
    }

    #[test]
    fn test_empty_object_is_success() {
        assert_eq!(decode("{}").unwrap(), json!({}));
    }

    #[test]
    fn test_array_direct() {
        assert_eq!(decode("[1, 2, 3]").unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_truncated_json_is_none() {
        assert!(decode(r#"{"plans": [{"planName": "Week""#).is_none());
    }

    #[test]
    fn test_decode_as_typed() {
        #[derive(serde::Deserialize)]
        struct Reply {
            reply: String,
        }
        let reply: Reply = decode_as("```json\n{\"reply\": \"hi\"}\n```").unwrap();
        assert_eq!(reply.reply, "hi");
        assert!(decode_as::<Reply>(r#"{"other": 1}"#).is_none());
    }

    fn arb_object() -> impl Strategy<Value = Value> {
        prop::collection::btree_map("[a-zA-Z][a-zA-Z0-9_]{0,8}", any::<i64>(), 0..6).prop_map(
            |map| {
                Value::Object(
                    map.into_iter()
                        .map(|(k, v)| (k, Value::from(v)))
                        .collect(),
                )
            },
        )
    }

    proptest! {
        #[test]
        fn prop_any_wrapping_decodes_to_same_value(value in arb_object()) {
            let text = serde_json::to_string(&value).unwrap();

            prop_assert_eq!(decode(&text), Some(value.clone()));
            prop_assert_eq!(decode(&format!("```json\n{}\n```", text)), Some(value.clone()));
            prop_assert_eq!(
                decode(&format!("here is your answer: {} hope it helps", text)),
                Some(value)
            );
        }
    }
}
