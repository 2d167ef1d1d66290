//! Domain core for searching the French business registry and preparing
//! exportable company rows.

pub mod app_config;
pub mod config;
pub mod entry;
pub mod links;
pub mod normalize;
pub mod search;
pub mod session;
pub mod status;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use entry::RawEntry;
pub use links::{
    lookup_link, opco_link, phone_directory_link, phone_directory_link_at, PAGESJAUNES_BASE_URL,
};
pub use normalize::{display_row, normalize, CompanyRow, DisplayRow};
pub use search::{
    search, RegistryClient, SearchError, SearchQuery, SearchResults, DEFAULT_RESULT_CAP,
};
pub use session::Session;
pub use status::{StatusMatch, ACTIVE_STATUS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
