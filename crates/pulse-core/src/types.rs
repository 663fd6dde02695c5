use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PulseError;

/// A user-supplied analysis subject. Never empty, always trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Topic(String);

impl Topic {
    /// Trim `raw` and reject it if nothing remains.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::EmptyTopic`] for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Result<Self, PulseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PulseError::EmptyTopic);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One modeled side of the debate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perspective {
    pub name: String,
    /// Estimated population share, 0–100.
    pub percentage: u8,
    /// Dominant emotion, e.g. `Hopeful`.
    pub emotion: String,
    /// Supporting arguments in the order the model gave them. Never empty.
    pub arguments: Vec<String>,
}

/// The undecided / middle-ground share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeutralBlock {
    pub percentage: u8,
    pub summary: String,
}

/// A citation as the collaborator reported it. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCitation {
    pub title: Option<String>,
    pub uri: Option<String>,
}

/// A retained citation. `uri` is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub uri: String,
}

/// Soft adjustments applied while normalizing an otherwise valid reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizationWarning {
    /// The three shares did not sum to 100 and were rescaled.
    /// `original` is `[sideA, sideB, neutral]` as the model reported them.
    PercentagesRescaled { original: [u8; 3] },
}

/// A validated opinion analysis for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseResult {
    pub topic: String,
    pub summary: String,
    pub side_a: Perspective,
    pub side_b: Perspective,
    pub neutral: NeutralBlock,
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<NormalizationWarning>,
}

/// What the model collaborator is asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Enable web-search grounding for this call.
    pub grounding: bool,
}

/// What the model collaborator returns: free-form text plus citations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelReply {
    pub text: String,
    pub citations: Vec<RawCitation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_parse_trims_input() {
        let topic = Topic::parse("  Remote Work \n").expect("valid topic");
        assert_eq!(topic.as_str(), "Remote Work");
        assert_eq!(topic.to_string(), "Remote Work");
    }

    #[test]
    fn topic_parse_rejects_empty() {
        assert!(matches!(Topic::parse(""), Err(PulseError::EmptyTopic)));
    }

    #[test]
    fn topic_parse_rejects_whitespace_only() {
        assert!(matches!(Topic::parse(" \t\n "), Err(PulseError::EmptyTopic)));
    }

    #[test]
    fn pulse_result_serializes_with_camel_case_sides() {
        let result = PulseResult {
            topic: "t".to_string(),
            summary: "s".to_string(),
            side_a: Perspective {
                name: "A".to_string(),
                percentage: 50,
                emotion: "Calm".to_string(),
                arguments: vec!["x".to_string()],
            },
            side_b: Perspective {
                name: "B".to_string(),
                percentage: 30,
                emotion: "Angry".to_string(),
                arguments: vec!["y".to_string()],
            },
            neutral: NeutralBlock {
                percentage: 20,
                summary: "n".to_string(),
            },
            sources: vec![Source {
                title: None,
                uri: "https://example.com".to_string(),
            }],
            warnings: vec![],
        };
        let json = serde_json::to_value(&result).expect("serialize PulseResult");
        assert_eq!(json["sideA"]["name"], "A");
        assert_eq!(json["sideB"]["percentage"], 30);
        assert!(json.get("warnings").is_none(), "empty warnings are omitted");
        assert!(json["sources"][0].get("title").is_none());
    }
}
