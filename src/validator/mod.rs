//! Synchronous heuristics run on raw user input before any AI call.

mod types;

pub use types::{
    IMAGE_PROMPT_RULES, InputRejection, InputRules, REPEATED_RUN_THRESHOLD, RejectionKind,
    TOPIC_RULES,
};

use crate::error::ServiceError;

/// Checks `input` against `rules`; the first failing check wins.
pub fn validate(input: &str, rules: &InputRules) -> Result<(), InputRejection> {
    let trimmed = input.trim();
    let char_count = trimmed.chars().count();

    if char_count < rules.min_chars {
        return Err(reject(
            RejectionKind::TooShort,
            format!(
                "Your {} is too short. Please enter at least {} characters.",
                rules.label, rules.min_chars
            ),
        ));
    }

    if char_count > rules.max_chars {
        return Err(reject(
            RejectionKind::TooLong,
            format!(
                "Your {} is too long. Please keep it under {} characters.",
                rules.label, rules.max_chars
            ),
        ));
    }

    if is_single_repeated_run(trimmed, char_count) {
        return Err(reject(
            RejectionKind::RepeatedCharacters,
            format!(
                "Please enter a meaningful {}, not just repeated characters.",
                rules.label
            ),
        ));
    }

    if !trimmed.chars().any(char::is_alphabetic) {
        return Err(reject(
            RejectionKind::SymbolsOnly,
            "Please use words, not just symbols or numbers.".to_string(),
        ));
    }

    if count_words(trimmed) < rules.min_words {
        return Err(reject(
            RejectionKind::TooFewWords,
            format!(
                "Please provide more detail. Describe your {} in at least {} words.",
                rules.label, rules.min_words
            ),
        ));
    }

    Ok(())
}

pub fn validate_topic(topic: &str) -> Result<(), ServiceError> {
    validate(topic, &TOPIC_RULES).map_err(|rejection| ServiceError::InputRejected(rejection.message))
}

pub fn validate_image_prompt(prompt: &str) -> Result<(), ServiceError> {
    validate(prompt, &IMAGE_PROMPT_RULES)
        .map_err(|rejection| ServiceError::InputRejected(rejection.message))
}

/// Whitespace-separated words; empty tokens never count.
pub fn count_words(input: &str) -> usize {
    input.split_whitespace().count()
}

fn is_single_repeated_run(trimmed: &str, char_count: usize) -> bool {
    if char_count < REPEATED_RUN_THRESHOLD {
        return false;
    }
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => chars.all(|ch| ch == first),
        None => false,
    }
}

fn reject(kind: RejectionKind, message: String) -> InputRejection {
    InputRejection { kind, message }
}
