use thiserror::Error;

/// Errors returned by the SIRENE API client.
#[derive(Debug, Error)]
pub enum SireneError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the integration key (HTTP 401 or 403).
    #[error("SIRENE API rejected the API key (HTTP {status})")]
    Unauthorized { status: u16 },

    /// HTTP 429: the per-minute request quota is exhausted.
    #[error("SIRENE API rate limit reached")]
    RateLimited,

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid SIRENE base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("invalid SIRET '{0}': expected 14 digits")]
    InvalidSiret(String),
}
