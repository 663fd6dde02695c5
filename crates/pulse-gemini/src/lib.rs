//! Gemini `generateContent` client for Social Pulse.
//!
//! Sends the analysis prompt with Google Search grounding enabled and returns
//! the reply text plus the grounding citations. Implements
//! [`pulse_core::ModelCollaborator`] so the core pipeline stays unaware of HTTP.

pub mod client;
pub mod error;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
