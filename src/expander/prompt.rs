pub(crate) const EXPANDER_SYSTEM_PROMPT: &str = r#"You are an expert educator. Expand one step of a learning plan into deeper, practical guidance.

OUTPUT FORMAT (STRICT JSON ONLY)
- Return exactly one JSON object, no prose, no markdown.
{
  "additional_context": "<a short paragraph on why this step matters and how it fits the topic>",
  "practical_details": ["<concrete action or technique>"],
  "important_considerations": ["<thing to keep in mind>"],
  "real_world_examples": ["<where this shows up in practice>"],
  "potential_challenges": ["<common difficulty and how to handle it>"]
}

RULES
- 3 to 5 entries per list, each one or two sentences.
- Stay specific to the given step; do not restate the whole plan.
"#;

pub(crate) fn expansion_user_prompt(
    topic: &str,
    step_title: &str,
    step_description: &str,
    position: Option<(usize, usize)>,
) -> String {
    let mut prompt = format!("Learning topic: {}\n", topic.trim());
    if let Some((index, count)) = position {
        prompt.push_str(&format!("This is step {} of {}.\n", index + 1, count));
    }
    prompt.push_str(&format!(
        "Step title: {}\nStep description: {}\n\nExpand this step.",
        step_title.trim(),
        step_description.trim()
    ));
    prompt
}
