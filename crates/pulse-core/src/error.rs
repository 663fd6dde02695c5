use thiserror::Error;

/// Reasons a model reply could not be turned into a [`crate::PulseResult`].
#[derive(Debug, Error)]
pub enum NormalizationError {
    /// The reply (after fence stripping) is not parseable JSON.
    ///
    /// `raw` holds the untouched reply text for diagnostics; it must never be
    /// shown to end users.
    #[error("model reply is not valid JSON: {reason}")]
    MalformedPayload { raw: String, reason: String },

    /// The reply parsed but a required field is absent or of the wrong kind.
    #[error("model reply failed validation at `{path}`: expected {expected}, found {found}")]
    SchemaMismatch {
        path: String,
        expected: &'static str,
        found: String,
    },
}

/// A failure originating in the model collaborator call itself.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct UpstreamError {
    message: String,
}

impl UpstreamError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Every way a single search can end without a result.
#[derive(Debug, Error)]
pub enum PulseError {
    /// The topic was empty after trimming. Raised before any network call.
    #[error("topic is empty")]
    EmptyTopic,

    #[error("model collaborator failed: {0}")]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    /// A newer search started before this one settled.
    #[error("search superseded by a newer request")]
    Superseded,
}

impl PulseError {
    /// The single human-readable message shown to end users.
    ///
    /// Diagnostic detail stays in `Display` and the logs.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            PulseError::EmptyTopic => "Enter a topic to analyze.",
            PulseError::Upstream(_) => "Unable to connect to the social pulse network.",
            PulseError::Normalization(_) => "Failed to parse social analysis data.",
            PulseError::Superseded => "A newer search replaced this one.",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
