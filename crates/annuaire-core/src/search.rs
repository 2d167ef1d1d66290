//! Sector/department search against a registry client.
//!
//! The orchestrator validates operator input, calls the client once with a
//! hard result cap, and normalizes the returned entries in upstream order.
//! Retrying is the client's business; a failed call fails the whole search.

use std::future::Future;

use thiserror::Error;

use crate::entry::RawEntry;
use crate::normalize::{normalize, CompanyRow};

/// Upper bound on entries requested from the registry per search.
pub const DEFAULT_RESULT_CAP: usize = 300;

/// A source of registry entries, typically an HTTP client for the SIRENE API.
///
/// Implementations may serve demonstration data when no credential is
/// configured; that is a degraded mode, not an error.
pub trait RegistryClient {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns at most `limit` entries matching `sector` in `department`.
    fn search_by_sector_and_department(
        &self,
        sector: &str,
        department: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RawEntry>, Self::Error>> + Send;
}

/// The parameters a result set was produced with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub sector: String,
    pub department: String,
    pub cap: usize,
}

/// Normalized rows of one successful search, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub query: SearchQuery,
    pub rows: Vec<CompanyRow>,
}

impl SearchResults {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    /// Sector or department blank after trimming; raised before any I/O.
    #[error("Veuillez remplir les champs Secteur et Département.")]
    EmptyInput,

    /// The registry client failed; no partial results are kept.
    #[error("Une erreur est survenue : {message}")]
    Upstream {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Runs one search and normalizes the results.
///
/// `sector` and `department` are trimmed before use. `cap` bounds the number
/// of rows even if the client returns more.
///
/// # Errors
///
/// - [`SearchError::EmptyInput`] if either input is blank; the client is not called.
/// - [`SearchError::Upstream`] if the client call fails.
pub async fn search<C>(
    client: &C,
    sector: &str,
    department: &str,
    cap: usize,
) -> Result<SearchResults, SearchError>
where
    C: RegistryClient,
{
    let sector = sector.trim();
    let department = department.trim();
    if sector.is_empty() || department.is_empty() {
        return Err(SearchError::EmptyInput);
    }

    tracing::info!(sector, department, cap, "searching registry");

    let entries = client
        .search_by_sector_and_department(sector, department, cap)
        .await
        .map_err(|e| {
            tracing::warn!(sector, department, error = %e, "registry search failed");
            SearchError::Upstream {
                message: e.to_string(),
                source: Box::new(e),
            }
        })?;

    if entries.len() > cap {
        tracing::debug!(
            returned = entries.len(),
            cap,
            "registry returned more entries than requested; truncating"
        );
    }

    let rows: Vec<CompanyRow> = entries.into_iter().take(cap).map(normalize).collect();

    tracing::info!(sector, department, count = rows.len(), "registry search finished");

    Ok(SearchResults {
        query: SearchQuery {
            sector: sector.to_string(),
            department: department.to_string(),
            cap,
        },
        rows,
    })
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
