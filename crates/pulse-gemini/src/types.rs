//! Wire types for the Gemini `generateContent` endpoint.
//!
//! Only the fields Social Pulse reads are modeled; everything else in the
//! response is ignored.

use pulse_core::{ModelReply, RawCitation};
use serde::{Deserialize, Serialize};

use crate::error::GeminiError;

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl<'a> GenerateContentRequest<'a> {
    /// A single-turn user request, with the Google Search tool attached when
    /// `grounding` is set.
    #[must_use]
    pub fn new(prompt: &'a str, grounding: bool) -> Self {
        let tools = if grounding {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
            tools,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub role: &'static str,
    pub parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TextPart<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Tool {
    pub google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
pub struct GoogleSearch {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
pub struct WebChunk {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Collapse the first candidate into reply text and raw citations.
    ///
    /// Text parts are concatenated in order. Grounding chunks without a `web`
    /// entry are skipped; citation filtering beyond that is left to the
    /// normalizer.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::EmptyResponse`] when there is no candidate or the
    /// first candidate has no text.
    pub fn into_reply(self) -> Result<ModelReply, GeminiError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = block_reason.map_or_else(
                || "no candidates".to_string(),
                |r| format!("prompt blocked: {r}"),
            );
            return Err(GeminiError::EmptyResponse { reason });
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.map_or_else(
                || "candidate has no text".to_string(),
                |r| format!("finish reason {r}"),
            );
            return Err(GeminiError::EmptyResponse { reason });
        }

        let citations = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|chunk| chunk.web)
            .map(|web| RawCitation {
                title: web.title,
                uri: web.uri,
            })
            .collect();

        Ok(ModelReply { text, citations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).expect("valid response shape")
    }

    #[test]
    fn request_attaches_google_search_only_when_grounded() {
        let grounded = serde_json::to_value(GenerateContentRequest::new("hi", true)).unwrap();
        assert_eq!(
            grounded,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "hi"}]}],
                "tools": [{"google_search": {}}]
            })
        );

        let plain = serde_json::to_value(GenerateContentRequest::new("hi", false)).unwrap();
        assert!(plain.get("tools").is_none());
    }

    #[test]
    fn joins_text_parts_and_keeps_citation_order() {
        let response = parse(serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": "1}"}]},
                "finishReason": "STOP",
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://one.example", "title": "One"}},
                        {"retrievedContext": {"uri": "ignored"}},
                        {"web": {"uri": "https://two.example"}}
                    ]
                }
            }]
        }));

        let reply = response.into_reply().expect("reply");
        assert_eq!(reply.text, "{\"a\":1}");
        assert_eq!(reply.citations.len(), 2);
        assert_eq!(reply.citations[0].title.as_deref(), Some("One"));
        assert_eq!(reply.citations[1].uri.as_deref(), Some("https://two.example"));
        assert!(reply.citations[1].title.is_none());
    }

    #[test]
    fn missing_grounding_metadata_yields_no_citations() {
        let response = parse(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "{}"}]}}]
        }));
        let reply = response.into_reply().expect("reply");
        assert!(reply.citations.is_empty());
    }

    #[test]
    fn blocked_prompt_is_empty_response() {
        let response = parse(serde_json::json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }));
        let err = response.into_reply().unwrap_err();
        assert!(
            matches!(err, GeminiError::EmptyResponse { ref reason } if reason.contains("SAFETY")),
            "got {err:?}"
        );
    }

    #[test]
    fn candidate_without_text_is_empty_response() {
        let response = parse(serde_json::json!({
            "candidates": [{"content": {"parts": []}, "finishReason": "MAX_TOKENS"}]
        }));
        let err = response.into_reply().unwrap_err();
        assert!(
            matches!(
                err,
                GeminiError::EmptyResponse { ref reason } if reason.contains("MAX_TOKENS")
            ),
            "got {err:?}"
        );
    }
}
