pub(crate) const GENERATOR_SYSTEM_PROMPT: &str = r#"You are an expert educator who writes practical, actionable learning plans and curates real learning resources.

OUTPUT FORMAT (STRICT JSON ONLY)
- Return exactly one JSON object, no prose, no markdown.
{
  "plan": [
    {"title": "Step 1: <short title>", "description": "<what the learner should actually DO>"}
  ],
  "examples": [
    {"title": "<resource name>", "url": "<https URL>", "description": "<why it helps>"}
  ]
}

RULES
- Steps are ordered from first to last; each builds on the previous one.
- Every step title starts with "Step N:".
- Resources must be real, well-known, publicly reachable pages (official docs, established courses, reputable tutorials).
- Every resource URL is an absolute https URL.
- Produce exactly the number of steps and resources requested.
"#;

pub(crate) fn generation_user_prompt(topic: &str, steps: u32, resources: u32) -> String {
    format!(
        "Learning topic: {topic}\n\nCreate a learning plan with exactly {steps} steps and list exactly {resources} real learning resources for this topic."
    )
}

pub(crate) const FALLBACK_SYSTEM_PROMPT: &str = r#"You curate real learning resources.

OUTPUT FORMAT (STRICT JSON ONLY)
- Return exactly one JSON object, no prose, no markdown.
{
  "examples": [
    {"title": "<resource name>", "url": "<https URL>", "description": "<why it helps>"}
  ]
}

RULES
- Only list real, well-known, publicly reachable pages: official documentation, established courses, reputable tutorials, reference sites.
- Every URL is an absolute https URL.
"#;

pub(crate) fn fallback_user_prompt(topic: &str, resources: u32, known_urls: &[&str]) -> String {
    let mut prompt = format!("Learning topic: {topic}\n\nList exactly {resources} real learning resources for this topic.");
    if !known_urls.is_empty() {
        prompt.push_str("\nDo not repeat these URLs: ");
        prompt.push_str(&known_urls.join(", "));
    }
    prompt
}
