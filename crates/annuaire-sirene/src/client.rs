//! HTTP client for the INSEE SIRENE API (`/siret` endpoint).
//!
//! Wraps `reqwest` with SIRENE-specific status handling, API key management
//! and retry. Without an API key the client runs in demonstration mode and
//! answers from [`crate::demo`] instead of the network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use annuaire_core::{AppConfig, RawEntry, RegistryClient};
use reqwest::{Client, StatusCode, Url};

use crate::demo::demo_entries;
use crate::error::SireneError;
use crate::parse::{build_entry, group_by_siren};
use crate::retry::retry_with_backoff;
use crate::types::{Establishment, SiretResponse};

const DEFAULT_BASE_URL: &str = "https://api.insee.fr/api-sirene/3.11";
const API_KEY_HEADER: &str = "X-INSEE-Api-Key-Integration";

/// Largest page the `/siret` endpoint serves in one response.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Tuning knobs for [`SireneClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    /// Drop legal units declaring 50 employees or more.
    pub small_companies_only: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
            user_agent: "annuaire/0.1 (registry-search)".to_string(),
            max_retries: 2,
            backoff_base_ms: 1_000,
            small_companies_only: true,
        }
    }
}

impl ClientOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.sirene_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
            small_companies_only: config.small_companies_only,
        }
    }
}

/// Client for the INSEE SIRENE API.
///
/// Use [`SireneClient::new`] with `None` as the key for demonstration mode,
/// or point [`ClientOptions::base_url`] at a mock server in tests.
pub struct SireneClient {
    client: Client,
    api_key: Option<String>,
    siret_url: Url,
    options: ClientOptions,
    demo_warned: AtomicBool,
}

impl SireneClient {
    /// Creates a client. A `None` or blank `api_key` selects demonstration mode.
    ///
    /// # Errors
    ///
    /// Returns [`SireneError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SireneError::InvalidBaseUrl`] if
    /// `options.base_url` does not parse.
    pub fn new(api_key: Option<&str>, options: ClientOptions) -> Result<Self, SireneError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(options.user_agent.as_str())
            .build()?;

        let endpoint = format!("{}/siret", options.base_url.trim_end_matches('/'));
        let siret_url = Url::parse(&endpoint).map_err(|e| SireneError::InvalidBaseUrl {
            base_url: options.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            siret_url,
            options,
            demo_warned: AtomicBool::new(false),
        })
    }

    /// `true` when no API key is configured and fixture data is served.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.api_key.is_none()
    }

    /// Looks up a single establishment by its 14-digit SIRET.
    ///
    /// # Errors
    ///
    /// - [`SireneError::InvalidSiret`] if `siret` is not 14 ASCII digits.
    /// - Any transport, status or decoding error from the API.
    pub async fn search_by_siret(&self, siret: &str) -> Result<Vec<RawEntry>, SireneError> {
        let siret = siret.trim();
        if siret.len() != 14 || !siret.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SireneError::InvalidSiret(siret.to_string()));
        }

        if self.is_demo() {
            self.warn_demo_once();
            return Ok(demo_entries("demo", "75")
                .into_iter()
                .filter(|e| e.siret.as_deref() == Some(siret))
                .collect());
        }

        let establishments = self.fetch_establishments(&format!("siret:{siret}"), 1).await?;
        Ok(self.collect_entries(establishments, 1, false).await)
    }

    /// Groups establishments by company and builds one entry per SIREN,
    /// fetching the headquarters separately when it is not among them.
    ///
    /// `small_companies_only` narrows sector searches; identifier lookups
    /// pass `false` so an existing record is never hidden.
    async fn collect_entries(
        &self,
        establishments: Vec<Establishment>,
        limit: usize,
        small_companies_only: bool,
    ) -> Vec<RawEntry> {
        let groups = group_by_siren(establishments);
        let mut entries = Vec::with_capacity(groups.len());

        for group in &groups {
            let fetched;
            let headquarters = match group.headquarters() {
                Some(hq) => hq,
                None => {
                    fetched = self.fetch_headquarters(&group.siren).await;
                    match fetched.as_ref() {
                        Some(hq) => hq,
                        None => &group.establishments[0],
                    }
                }
            };

            if let Some(entry) = build_entry(group, headquarters, small_companies_only) {
                entries.push(entry);
            }
            if entries.len() >= limit {
                break;
            }
        }

        entries
    }

    /// Best-effort lookup of a company's headquarters; failures yield `None`.
    async fn fetch_headquarters(&self, siren: &str) -> Option<Establishment> {
        if siren.len() != 9 {
            return None;
        }
        let query = format!("siren:{siren} AND etablissementSiege:true");
        match self.fetch_establishments(&query, 1).await {
            Ok(found) => found.into_iter().next(),
            Err(e) => {
                tracing::debug!(siren, error = %e, "headquarters lookup failed");
                None
            }
        }
    }

    /// Runs one `/siret` query with retry and returns its establishments.
    async fn fetch_establishments(
        &self,
        query: &str,
        page_size: usize,
    ) -> Result<Vec<Establishment>, SireneError> {
        let url = self.build_url(query, page_size);
        let response = retry_with_backoff(
            self.options.max_retries,
            self.options.backoff_base_ms,
            || self.request_json(&url),
        )
        .await?;
        Ok(response.etablissements)
    }

    /// Builds the `/siret` URL with percent-encoded `q` and `nombre` parameters.
    fn build_url(&self, query: &str, page_size: usize) -> Url {
        let mut url = self.siret_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            pairs.append_pair("nombre", &page_size.min(MAX_PAGE_SIZE).to_string());
        }
        url
    }

    /// Sends a GET request and decodes the body.
    ///
    /// INSEE answers 404 when a query matches nothing; that maps to an empty
    /// response rather than an error.
    async fn request_json(&self, url: &Url) -> Result<SiretResponse, SireneError> {
        let mut request = self.client.get(url.clone());
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        let response = request.send().await?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => return Ok(SiretResponse::default()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(SireneError::Unauthorized {
                    status: status.as_u16(),
                })
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(SireneError::RateLimited),
            s if !s.is_success() => {
                return Err(SireneError::UnexpectedStatus {
                    status: s.as_u16(),
                    url: url.to_string(),
                })
            }
            _ => {}
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SireneError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    fn warn_demo_once(&self) {
        if !self.demo_warned.swap(true, Ordering::Relaxed) {
            tracing::warn!("no SIRENE_API_KEY configured; serving demonstration data");
        }
    }
}

impl RegistryClient for SireneClient {
    type Error = SireneError;

    /// Searches establishments by NAF code or company name within a
    /// department or postal-code prefix.
    async fn search_by_sector_and_department(
        &self,
        sector: &str,
        department: &str,
        limit: usize,
    ) -> Result<Vec<RawEntry>, SireneError> {
        if self.is_demo() {
            self.warn_demo_once();
            return Ok(demo_entries(sector, department));
        }

        let query = build_sector_query(sector, department);
        tracing::debug!(%query, limit, "querying SIRENE");
        let mut establishments = self.fetch_establishments(&query, limit).await?;
        establishments.truncate(limit);

        let fetched = establishments.len();
        let entries = self
            .collect_entries(establishments, limit, self.options.small_companies_only)
            .await;
        tracing::debug!(fetched, companies = entries.len(), "SIRENE results grouped by SIREN");
        Ok(entries)
    }
}

/// Builds the SIRENE search expression for a sector and department.
///
/// A sector containing a digit is treated as a NAF activity code and matched
/// exactly; anything else is a company-name prefix. The department (or a
/// full postal code) is matched as a postal-code prefix.
#[must_use]
pub fn build_sector_query(sector: &str, department: &str) -> String {
    if sector.chars().any(|c| c.is_ascii_digit()) {
        format!("activitePrincipaleUniteLegale:{sector} AND codePostalEtablissement:{department}*")
    } else {
        format!("denominationUniteLegale:{sector}* AND codePostalEtablissement:{department}*")
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
