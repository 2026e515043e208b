use std::fmt;

/// Limits applied to one kind of free-text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputRules {
    /// Noun used in user-facing messages ("topic", "prompt").
    pub label: &'static str,
    pub min_chars: usize,
    pub max_chars: usize,
    pub min_words: usize,
}

/// Rules for learning topics. Short topics are covered by `min_chars`.
pub const TOPIC_RULES: InputRules = InputRules {
    label: "topic",
    min_chars: 3,
    max_chars: 200,
    min_words: 1,
};

/// Rules for background image prompts.
pub const IMAGE_PROMPT_RULES: InputRules = InputRules {
    label: "prompt",
    min_chars: 3,
    max_chars: 1000,
    min_words: 2,
};

/// Minimum run length for the repeated-character check.
pub const REPEATED_RUN_THRESHOLD: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    TooShort,
    TooLong,
    RepeatedCharacters,
    SymbolsOnly,
    TooFewWords,
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RejectionKind::TooShort => "too-short",
            RejectionKind::TooLong => "too-long",
            RejectionKind::RepeatedCharacters => "repeated-characters",
            RejectionKind::SymbolsOnly => "symbols-only",
            RejectionKind::TooFewWords => "too-few-words",
        };
        write!(f, "{label}")
    }
}

/// Why an input failed the heuristics, with the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRejection {
    pub kind: RejectionKind,
    pub message: String,
}

impl fmt::Display for InputRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for InputRejection {}
