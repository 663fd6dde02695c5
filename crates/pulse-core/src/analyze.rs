//! One grounded analysis: prompt → model collaborator → normalizer.

use futures::future::BoxFuture;

use crate::error::{NormalizationError, PulseError, UpstreamError};
use crate::normalize::normalize;
use crate::prompt::build_prompt;
use crate::types::{GenerateRequest, ModelReply, PulseResult, Topic};

/// The hosted model that answers the analysis prompt.
///
/// Object-safe so servers and tests can hold `Arc<dyn ModelCollaborator>`.
pub trait ModelCollaborator: Send + Sync {
    /// Send one request and return the reply text plus grounding citations.
    fn generate<'a>(
        &'a self,
        request: &'a GenerateRequest,
    ) -> BoxFuture<'a, Result<ModelReply, UpstreamError>>;
}

/// Run a single grounded analysis for `topic`.
///
/// Diagnostic detail (raw reply, parse error, failing field) is logged here and
/// never carried into [`PulseError::user_message`]. No retries: every failure
/// is terminal for this search.
///
/// # Errors
///
/// - [`PulseError::Upstream`] if the collaborator fails or returns no text.
/// - [`PulseError::Normalization`] if the reply cannot be normalized.
pub async fn analyze(
    model: &dyn ModelCollaborator,
    topic: &Topic,
) -> Result<PulseResult, PulseError> {
    let request = GenerateRequest {
        prompt: build_prompt(topic),
        grounding: true,
    };

    tracing::info!(topic = %topic, "requesting grounded analysis");
    let reply = model.generate(&request).await.inspect_err(|e| {
        tracing::error!(topic = %topic, error = %e, "model collaborator failed");
    })?;

    if reply.text.trim().is_empty() {
        tracing::error!(topic = %topic, "model collaborator returned no text");
        return Err(UpstreamError::new("model returned an empty reply").into());
    }

    match normalize(&reply.text, &reply.citations) {
        Ok(result) => {
            tracing::info!(
                topic = %topic,
                sources = result.sources.len(),
                rescaled = !result.warnings.is_empty(),
                "analysis normalized"
            );
            Ok(result)
        }
        Err(err) => {
            match &err {
                NormalizationError::MalformedPayload { raw, reason } => {
                    tracing::warn!(
                        topic = %topic,
                        reason = %reason,
                        raw = %raw,
                        "model reply is not JSON"
                    );
                }
                NormalizationError::SchemaMismatch { path, expected, found } => {
                    tracing::warn!(
                        topic = %topic,
                        path = %path,
                        expected = %expected,
                        found = %found,
                        raw = %reply.text,
                        "model reply failed schema validation"
                    );
                }
            }
            Err(err.into())
        }
    }
}
