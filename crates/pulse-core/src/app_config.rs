use std::net::SocketAddr;
use std::time::Duration;

#[derive(Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub request_timeout_secs: u64,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub phase_interval_ms: u64,
}

impl AppConfig {
    /// Interval between cosmetic search-phase messages.
    #[must_use]
    pub fn phase_interval(&self) -> Duration {
        Duration::from_millis(self.phase_interval_ms)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("gemini_api_key", &"[redacted]")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("phase_interval_ms", &self.phase_interval_ms)
            .finish()
    }
}
