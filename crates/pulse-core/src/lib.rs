//! Core domain for Social Pulse.
//!
//! Builds the grounded analysis prompt for a topic, normalizes the model's
//! free-form reply into a validated [`PulseResult`], and maps results into the
//! dashboard view model. Network access lives behind [`ModelCollaborator`];
//! this crate performs no I/O of its own.

pub mod analyze;
pub mod app_config;
pub mod config;
pub mod error;
pub mod fence;
pub mod normalize;
pub mod percentages;
pub mod phases;
pub mod present;
pub mod prompt;
pub mod session;
pub mod types;

pub use analyze::{analyze, ModelCollaborator};
pub use app_config::AppConfig;
pub use config::load_app_config_from_env;
pub use error::{ConfigError, NormalizationError, PulseError, UpstreamError};
pub use fence::strip_code_fence;
pub use normalize::{filter_citations, normalize, MAX_SOURCES};
pub use phases::{with_phases, PhaseTicker, PHASES};
pub use present::DashboardView;
pub use prompt::build_prompt;
pub use session::SearchSession;
pub use types::{
    GenerateRequest, ModelReply, NeutralBlock, NormalizationWarning, Perspective, PulseResult,
    RawCitation, Source, Topic,
};
