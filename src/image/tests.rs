use super::screening::{self, Screening, interpret_verdict, screen};
use super::*;
use crate::testing::{ScriptedClient, ScriptedImageClient, sample_config};

#[test]
fn placeholder_prompts_are_rejected() {
    assert!(matches!(screen("test image"), Screening::Rejected(ref m) if m == screening::PLACEHOLDER_MESSAGE));
    assert!(matches!(screen("asdf qwerty"), Screening::Rejected(_)));
    // Longer prompts may mention the word.
    assert_eq!(screen("a sample of autumn leaves on a forest floor"), Screening::Accepted);
}

#[test]
fn low_variety_prompts_are_rejected() {
    assert_eq!(
        screen("ab ab ab"),
        Screening::Rejected(screening::REPEATED_MESSAGE.to_string())
    );
}

#[test]
fn animation_requests_are_rejected() {
    assert_eq!(
        screen("animated waves crashing on rocks"),
        Screening::Rejected(screening::ANIMATION_MESSAGE.to_string())
    );
    assert!(matches!(screen("a dancing cat GIF"), Screening::Rejected(_)));
}

#[test]
fn visual_prompts_skip_review_unless_a_name_appears() {
    assert_eq!(screen("a sunset over mountains"), Screening::Accepted);
    assert_eq!(screen("cozy coffee shop interiors"), Screening::Accepted);
    assert_eq!(screen("taylor swift on a beach"), Screening::NeedsReview);
    assert_eq!(screen("freedom and justice"), Screening::NeedsReview);
}

#[test]
fn verdicts_are_read_leniently() {
    assert_eq!(interpret_verdict("VALID"), None);
    assert_eq!(interpret_verdict("valid."), None);
    assert_eq!(interpret_verdict("Sure, why not"), None);
    assert_eq!(
        interpret_verdict("INVALID: this is an abstract concept"),
        Some("this is an abstract concept".to_string())
    );
    assert_eq!(
        interpret_verdict("INVALID"),
        Some(screening::NOT_VISUAL_MESSAGE.to_string())
    );
}

#[tokio::test]
async fn visual_prompt_generates_without_review() {
    let config = sample_config();
    let llm = ScriptedClient::new();
    let images = ScriptedImageClient::succeeding("aGVsbG8=");

    let image = generate_background(&llm, &images, "  a sunset over mountains ", &config.models)
        .await
        .unwrap();

    assert_eq!(image.data_url, "data:image/png;base64,aGVsbG8=");
    assert_eq!(image.png_bytes().unwrap(), b"hello");
    assert_eq!(llm.calls(), 0);
    assert_eq!(images.calls(), 1);
}

#[tokio::test]
async fn validator_failures_make_no_calls() {
    let config = sample_config();
    let llm = ScriptedClient::new();
    let images = ScriptedImageClient::succeeding("aGVsbG8=");

    for prompt in ["hi", "!!!!! ####", "mountains"] {
        let err = generate_background(&llm, &images, prompt, &config.models)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InputRejected(_)), "{prompt}: {err:?}");
    }
    assert_eq!(llm.calls(), 0);
    assert_eq!(images.calls(), 0);
}

#[tokio::test]
async fn review_rejection_stops_before_generation() {
    let config = sample_config();
    let llm = ScriptedClient::with_replies(["INVALID: abstract concept"]);
    let images = ScriptedImageClient::succeeding("aGVsbG8=");

    let err = generate_background(&llm, &images, "freedom and justice", &config.models)
        .await
        .unwrap_err();

    assert_eq!(err, ServiceError::rejected("abstract concept"));
    assert_eq!(llm.calls(), 1);
    assert_eq!(images.calls(), 0);
}

#[tokio::test]
async fn failed_review_is_lenient() {
    let config = sample_config();
    let llm = ScriptedClient::new();
    llm.push_error(ClientError::Timeout { timeout_secs: 30 });
    let images = ScriptedImageClient::succeeding("aGVsbG8=");

    let image = generate_background(&llm, &images, "freedom and justice", &config.models).await;

    assert!(image.is_ok());
    assert_eq!(images.calls(), 1);
}

#[tokio::test]
async fn content_policy_is_distinct_from_validation() {
    let config = sample_config();
    let llm = ScriptedClient::new();
    let images = ScriptedImageClient::failing(ClientError::ContentPolicy("safety system".into()));

    let err = generate_background(&llm, &images, "a dark city at night", &config.models)
        .await
        .unwrap_err();

    assert_eq!(err, ServiceError::ContentPolicy(CONTENT_POLICY_MESSAGE.to_string()));
    assert_eq!(err.status().as_u16(), 400);
}

#[tokio::test]
async fn provider_outage_is_upstream_unavailable() {
    let config = sample_config();
    let llm = ScriptedClient::new();
    let images = ScriptedImageClient::failing(ClientError::Unavailable);

    let err = generate_background(&llm, &images, "a dark city at night", &config.models)
        .await
        .unwrap_err();

    assert_eq!(err, ServiceError::upstream(GENERATION_FAILED));
    assert_eq!(err.status().as_u16(), 502);
}
