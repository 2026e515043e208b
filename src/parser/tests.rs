use serde::Deserialize;
use serde_json::json;

use super::coerce;
use super::{extract_json_object, parse_response};

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
struct Sample {
    #[serde(deserialize_with = "coerce::string")]
    name: String,
    #[serde(deserialize_with = "coerce::count")]
    count: Option<u32>,
    #[serde(deserialize_with = "coerce::flag")]
    enabled: bool,
    #[serde(deserialize_with = "coerce::string_list")]
    tags: Vec<String>,
    #[serde(deserialize_with = "coerce::entries")]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    title: String,
}

#[test]
fn fenced_response_with_prose_matches_bare_json() {
    let bare = r#"{"name":"rust","count":3,"enabled":true,"tags":["a","b"],"items":[{"title":"x"}]}"#;
    let wrapped = format!("Sure! Here is the plan you asked for:\n```json\n{bare}\n```\nLet me know if you need more.");

    let from_bare: Sample = parse_response(bare).unwrap();
    let from_wrapped: Sample = parse_response(&wrapped).unwrap();
    assert_eq!(from_bare, from_wrapped);
    assert_eq!(from_bare.count, Some(3));
}

#[test]
fn extract_strips_fences_without_newline() {
    let extracted = extract_json_object("```json{\"a\":1}```").unwrap();
    assert_eq!(extracted, "{\"a\":1}");
}

#[test]
fn extract_drops_think_blocks() {
    let raw = "<think>maybe {\"wrong\":true}</think>{\"right\":true}";
    assert_eq!(extract_json_object(raw).unwrap(), "{\"right\":true}");

    let unclosed = "{\"a\":1}<think>never {closed";
    assert_eq!(extract_json_object(unclosed).unwrap(), "{\"a\":1}");
}

#[test]
fn extract_spans_first_open_to_last_close() {
    let raw = "prefix {\"outer\":{\"inner\":1}} trailing";
    assert_eq!(extract_json_object(raw).unwrap(), "{\"outer\":{\"inner\":1}}");
}

#[test]
fn extract_returns_none_without_object() {
    assert!(extract_json_object("no json here").is_none());
    assert!(extract_json_object("} backwards {").is_none());
}

#[test]
fn parse_failure_carries_raw_text() {
    let err = parse_response::<Sample>("I cannot help with that.").unwrap_err();
    assert_eq!(err.raw, "I cannot help with that.");
    assert!(err.reason.contains("no JSON object"));

    let err = parse_response::<Sample>("{\"name\": }").unwrap_err();
    assert!(err.reason.starts_with("invalid JSON"));

    let err = parse_response::<Sample>("   ").unwrap_err();
    assert_eq!(err.reason, "empty response");
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let parsed: Sample = parse_response("{}").unwrap();
    assert_eq!(parsed, Sample::default());
}

#[test]
fn mismatched_types_are_coerced_or_dropped() {
    let parsed: Sample = parse_response(
        &json!({
            "name": 42,
            "count": "7",
            "enabled": "yes",
            "tags": "solo",
            "items": [{"title": "keep"}, {"nope": 1}, "junk"]
        })
        .to_string(),
    )
    .unwrap();

    assert_eq!(parsed.name, "42");
    assert_eq!(parsed.count, Some(7));
    assert!(parsed.enabled);
    assert_eq!(parsed.tags, vec!["solo".to_string()]);
    assert_eq!(parsed.items, vec![Item { title: "keep".to_string() }]);
}

#[test]
fn ambiguous_counts_are_treated_as_absent() {
    for value in [json!("five"), json!(-2), json!(2.5), json!(null), json!([3])] {
        assert_eq!(coerce::value_to_count(&value), None, "value {value}");
    }
    assert_eq!(coerce::value_to_count(&json!(4.0)), Some(4));
    assert_eq!(coerce::value_to_count(&json!(" 12 ")), Some(12));
}
