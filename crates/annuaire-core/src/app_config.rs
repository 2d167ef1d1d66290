use std::path::PathBuf;

use crate::status::StatusMatch;

#[derive(Clone)]
pub struct AppConfig {
    pub sirene_api_key: Option<String>,
    pub sirene_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub result_cap: usize,
    pub small_companies_only: bool,
    pub status_match: StatusMatch,
    pub export_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// `true` when no `SIRENE_API_KEY` is configured and the registry client
    /// serves demonstration data.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.sirene_api_key.is_none()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "sirene_api_key",
                &self.sirene_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("sirene_base_url", &self.sirene_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("result_cap", &self.result_cap)
            .field("small_companies_only", &self.small_companies_only)
            .field("status_match", &self.status_match)
            .field("export_dir", &self.export_dir)
            .field("log_level", &self.log_level)
            .finish()
    }
}
