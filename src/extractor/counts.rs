use std::sync::LazyLock;

use regex::Regex;

static STEP_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,4})\s*(?:steps?|stages?)\b").expect("valid regex"));

static RESOURCE_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,4})\s*(?:resources?|examples?|links?)\b").expect("valid regex")
});

/// Count of steps stated literally in the raw request ("give me 3 steps").
pub fn scan_step_count(raw: &str) -> Option<u32> {
    scan(&STEP_COUNT, raw)
}

/// Count of resources stated literally in the raw request ("10 examples").
pub fn scan_resource_count(raw: &str) -> Option<u32> {
    scan(&RESOURCE_COUNT, raw)
}

fn scan(pattern: &Regex, raw: &str) -> Option<u32> {
    pattern
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}
