use serde_json::json;

use super::types::MAX_TOPIC_CHARS;
use super::*;
use crate::client::ClientError;
use crate::testing::{ScriptedClient, sample_config};

fn reference() -> StepReference {
    StepReference::new(
        "Python programming",
        "Step 1: Install Python",
        "Download and install the latest Python release.",
    )
}

fn full_expansion() -> serde_json::Value {
    json!({
        "additional_context": "Everything else depends on a working interpreter.",
        "practical_details": ["Use the official installer", "Verify with python --version"],
        "important_considerations": ["Add Python to PATH"],
        "real_world_examples": ["CI images pin a Python version"],
        "potential_challenges": ["Multiple versions on one machine"]
    })
}

#[tokio::test]
async fn expands_step_with_one_call() {
    let config = sample_config();
    let client = ScriptedClient::new();
    client.push_json(full_expansion());

    let expanded = expand_step(&client, &reference(), &config.models).await.unwrap();

    assert_eq!(client.calls(), 1);
    assert_eq!(expanded.practical_details.len(), 2);
    assert_eq!(
        expanded.additional_context.as_deref(),
        Some("Everything else depends on a working interpreter.")
    );
    assert!(client.user_prompt(0).contains("Step 1: Install Python"));
}

#[tokio::test]
async fn camel_case_and_loose_fields_are_accepted() {
    let config = sample_config();
    let client = ScriptedClient::new();
    client.push_json(json!({
        "practicalDetails": "Only one detail",
        "potentialChallenges": ["Slow downloads", 42, {"nested": true}]
    }));

    let expanded = expand_step(&client, &reference(), &config.models).await.unwrap();

    assert_eq!(expanded.additional_context, None);
    assert_eq!(expanded.practical_details, vec!["Only one detail"]);
    assert_eq!(expanded.potential_challenges, vec!["Slow downloads", "42"]);
    assert!(expanded.real_world_examples.is_empty());
}

#[tokio::test]
async fn repeated_calls_yield_the_same_shape() {
    let config = sample_config();
    let client = ScriptedClient::new();
    client.push_json(full_expansion());
    client.push_json(json!({
        "additional_context": "A different wording.",
        "practical_details": ["Try pyenv"],
        "important_considerations": [],
        "real_world_examples": [],
        "potential_challenges": []
    }));

    for _ in 0..2 {
        let expanded = expand_step(&client, &reference(), &config.models).await.unwrap();
        let wire = serde_json::to_value(&expanded).unwrap();
        let keys: Vec<&str> = wire.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys.len(),
            5,
            "every field is serialized even when empty: {keys:?}"
        );
        for key in [
            "additionalContext",
            "practicalDetails",
            "importantConsiderations",
            "realWorldExamples",
            "potentialChallenges",
        ] {
            assert!(wire.get(key).is_some(), "missing {key}");
        }
    }
}

#[tokio::test]
async fn out_of_range_index_is_rejected_before_the_call() {
    let config = sample_config();
    let client = ScriptedClient::new();

    let err = expand_step(&client, &reference().at(999, 7), &config.models)
        .await
        .unwrap_err();

    assert_eq!(err, ServiceError::StepOutOfRange { index: 999, count: 7 });
    assert_eq!(err.status().as_u16(), 404);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn blank_fields_are_rejected_before_the_call() {
    let config = sample_config();
    let client = ScriptedClient::new();
    let blank = StepReference::new("Python programming", "   ", "Install it");

    let err = expand_step(&client, &blank, &config.models).await.unwrap_err();

    assert!(matches!(err, ServiceError::MalformedRequest(ref message) if message.contains("step_title")));
    assert_eq!(client.calls(), 0);
}

#[test]
fn overlong_fields_and_last_index_bounds() {
    let long_topic = "a".repeat(MAX_TOPIC_CHARS + 1);
    let err = StepReference::new(&long_topic, "Title", "Description")
        .check()
        .unwrap_err();
    assert!(matches!(err, ServiceError::MalformedRequest(_)));

    assert!(reference().at(6, 7).check().is_ok());
    assert!(reference().at(7, 7).check().is_err());
}

#[tokio::test]
async fn provider_failure_is_upstream_unavailable() {
    let config = sample_config();
    let client = ScriptedClient::new();
    client.push_error(ClientError::Timeout { timeout_secs: 30 });

    let err = expand_step(&client, &reference(), &config.models).await.unwrap_err();

    assert_eq!(err, ServiceError::upstream(EXPANSION_FAILED));
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn empty_or_garbled_expansion_is_upstream_unavailable() {
    let config = sample_config();
    let client = ScriptedClient::new();
    client.push_json(json!({"unrelated": "value"}));
    client.push_reply("no json here");

    for _ in 0..2 {
        let err = expand_step(&client, &reference(), &config.models).await.unwrap_err();
        assert!(matches!(err, ServiceError::UpstreamUnavailable(_)));
    }
}
