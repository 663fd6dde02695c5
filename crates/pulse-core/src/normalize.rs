//! Turns an untrusted model reply into a validated [`PulseResult`].
//!
//! The reply is fence-stripped, parsed as JSON, and walked field by field.
//! Anything missing or of the wrong kind fails with
//! [`NormalizationError::SchemaMismatch`] naming the dotted field path, so a
//! half-valid reply never reaches the dashboard.

use serde_json::{Map, Value};

use crate::error::NormalizationError;
use crate::fence::strip_code_fence;
use crate::percentages;
use crate::types::{
    NeutralBlock, NormalizationWarning, Perspective, PulseResult, RawCitation, Source,
};

/// Maximum number of citations kept on a result.
pub const MAX_SOURCES: usize = 5;

const EXPECT_OBJECT: &str = "an object";
const EXPECT_STRING: &str = "a string";
const EXPECT_PERCENTAGE: &str = "a number between 0 and 100";
const EXPECT_ARGUMENTS: &str = "a non-empty array of strings";

/// Normalize a raw model reply and its grounding citations.
///
/// Percentages that do not sum to 100 are rescaled rather than rejected; the
/// adjustment is recorded in [`PulseResult::warnings`].
///
/// # Errors
///
/// - [`NormalizationError::MalformedPayload`] if the fence-stripped text is
///   not JSON.
/// - [`NormalizationError::SchemaMismatch`] if the JSON does not have the
///   expected shape.
pub fn normalize(
    raw_text: &str,
    raw_citations: &[RawCitation],
) -> Result<PulseResult, NormalizationError> {
    let stripped = strip_code_fence(raw_text);
    let document: Value =
        serde_json::from_str(stripped).map_err(|e| NormalizationError::MalformedPayload {
            raw: raw_text.to_owned(),
            reason: e.to_string(),
        })?;

    let root = Fields::root(&document)?;
    let topic = root.string("topic")?;
    let summary = root.string("summary")?;
    let mut side_a = perspective(&root.object("sideA")?)?;
    let mut side_b = perspective(&root.object("sideB")?)?;
    let neutral_fields = root.object("neutral")?;
    let mut neutral = NeutralBlock {
        percentage: neutral_fields.percentage("percentage")?,
        summary: neutral_fields.string("summary")?,
    };

    let mut warnings = Vec::new();
    let reported = [side_a.percentage, side_b.percentage, neutral.percentage];
    let reported_total = percentages::total(reported);
    if reported_total != percentages::TOTAL {
        let [a, b, n] = percentages::rescale(reported);
        tracing::warn!(
            side_a = reported[0],
            side_b = reported[1],
            neutral = reported[2],
            total = reported_total,
            "percentages do not sum to 100; rescaled"
        );
        side_a.percentage = a;
        side_b.percentage = b;
        neutral.percentage = n;
        warnings.push(NormalizationWarning::PercentagesRescaled { original: reported });
    }

    Ok(PulseResult {
        topic,
        summary,
        side_a,
        side_b,
        neutral,
        sources: filter_citations(raw_citations),
        warnings,
    })
}

/// Keep citations with a non-empty URI, at most [`MAX_SOURCES`], in order.
///
/// Blank titles become `None`; the display fallback is applied when rendering.
#[must_use]
pub fn filter_citations(raw_citations: &[RawCitation]) -> Vec<Source> {
    raw_citations
        .iter()
        .filter_map(|citation| {
            let uri = citation.uri.as_deref()?.trim();
            if uri.is_empty() {
                return None;
            }
            let title = citation
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ToOwned::to_owned);
            Some(Source {
                title,
                uri: uri.to_owned(),
            })
        })
        .take(MAX_SOURCES)
        .collect()
}

fn perspective(fields: &Fields<'_>) -> Result<Perspective, NormalizationError> {
    Ok(Perspective {
        name: fields.string("name")?,
        percentage: fields.percentage("percentage")?,
        emotion: fields.string("emotion")?,
        arguments: fields.arguments("arguments")?,
    })
}

/// A JSON object together with its dotted path from the document root.
struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> Fields<'a> {
    fn root(document: &'a Value) -> Result<Self, NormalizationError> {
        match document {
            Value::Object(map) => Ok(Self {
                map,
                path: String::new(),
            }),
            other => Err(mismatch("$".to_owned(), EXPECT_OBJECT, other)),
        }
    }

    fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_owned()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    /// Look up `key`, treating an explicit `null` the same as an absent key.
    fn require(&self, key: &str, expected: &'static str) -> Result<&'a Value, NormalizationError> {
        match self.map.get(key) {
            Some(Value::Null) | None => Err(NormalizationError::SchemaMismatch {
                path: self.path_of(key),
                expected,
                found: "nothing".to_owned(),
            }),
            Some(value) => Ok(value),
        }
    }

    fn object(&self, key: &str) -> Result<Fields<'a>, NormalizationError> {
        match self.require(key, EXPECT_OBJECT)? {
            Value::Object(map) => Ok(Fields {
                map,
                path: self.path_of(key),
            }),
            other => Err(mismatch(self.path_of(key), EXPECT_OBJECT, other)),
        }
    }

    fn string(&self, key: &str) -> Result<String, NormalizationError> {
        match self.require(key, EXPECT_STRING)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch(self.path_of(key), EXPECT_STRING, other)),
        }
    }

    /// A share in `0..=100`. Fractional values are rounded to the nearest integer.
    fn percentage(&self, key: &str) -> Result<u8, NormalizationError> {
        let value = self.require(key, EXPECT_PERCENTAGE)?;
        let Some(number) = value.as_f64() else {
            return Err(mismatch(self.path_of(key), EXPECT_PERCENTAGE, value));
        };
        let rounded = number.round();
        if !(0.0..=100.0).contains(&rounded) {
            return Err(NormalizationError::SchemaMismatch {
                path: self.path_of(key),
                expected: EXPECT_PERCENTAGE,
                found: number.to_string(),
            });
        }
        // Range checked above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let share = rounded as u8;
        Ok(share)
    }

    fn arguments(&self, key: &str) -> Result<Vec<String>, NormalizationError> {
        let path = self.path_of(key);
        let items = match self.require(key, EXPECT_ARGUMENTS)? {
            Value::Array(items) => items,
            other => return Err(mismatch(path, EXPECT_ARGUMENTS, other)),
        };
        if items.is_empty() {
            return Err(NormalizationError::SchemaMismatch {
                path,
                expected: EXPECT_ARGUMENTS,
                found: "an empty array".to_owned(),
            });
        }
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(mismatch(format!("{path}[{i}]"), EXPECT_STRING, other)),
            })
            .collect()
    }
}

fn mismatch(path: String, expected: &'static str, found: &Value) -> NormalizationError {
    NormalizationError::SchemaMismatch {
        path,
        expected,
        found: kind_of(found).to_owned(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
