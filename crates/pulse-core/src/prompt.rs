//! Instruction text sent to the grounded model.

use crate::types::Topic;

/// Build the analysis prompt for `topic`.
///
/// The topic is embedded verbatim. The prompt describes the exact JSON shape
/// the normalizer expects and asks for raw JSON with shares summing to 100.
/// Web-search grounding itself is requested through
/// [`crate::GenerateRequest::grounding`], not through this text.
#[must_use]
pub fn build_prompt(topic: &Topic) -> String {
    let topic = topic.as_str();
    format!(
        r#"Act as a social media data analyst. Your task is to analyze the "Social Pulse" of the following topic: "{topic}".

Use the Google Search tool to find recent discussions, news articles, forum posts (like Reddit), and social commentary.

Based on the search results, construct a JSON analysis with the following strict structure. Do not use Markdown formatting in the response, just return the raw JSON object.

Structure:
{{
  "topic": "{topic}",
  "summary": "A brief 2-sentence overview of why this topic is trending or relevant right now.",
  "sideA": {{
    "name": "Name of the first major perspective (e.g., 'Pro-Reform', 'Optimists')",
    "percentage": number (estimated % of population holding this view, e.g. 45),
    "emotion": "Dominant emotion (e.g., 'Hopeful', 'Angry', 'Skeptical')",
    "arguments": ["Key argument 1", "Key argument 2", "Key argument 3"]
  }},
  "sideB": {{
    "name": "Name of the opposing perspective",
    "percentage": number (estimated %),
    "emotion": "Dominant emotion",
    "arguments": ["Key argument 1", "Key argument 2", "Key argument 3"]
  }},
  "neutral": {{
    "percentage": number (remaining %, ensuring sideA + sideB + neutral = 100),
    "summary": "Description of the middle ground or undecided view."
  }}
}}

Ensure the percentages sum to exactly 100. Base the arguments and emotions on the actual search results found."#
    )
}
