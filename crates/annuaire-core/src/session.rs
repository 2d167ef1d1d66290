//! Operator session: owns the result set of the most recent search.

use crate::search::{search, RegistryClient, SearchError, SearchResults, DEFAULT_RESULT_CAP};

/// Holds the "current results" slot between a search and an export.
///
/// The slot is replaced wholesale, and only when a search succeeds. Export
/// borrows it immutably, so it always sees one consistent result set.
#[derive(Debug)]
pub struct Session {
    cap: usize,
    current: Option<SearchResults>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_RESULT_CAP)
    }
}

impl Session {
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self { cap, current: None }
    }

    /// Runs a search and, on success, makes its rows the current results.
    ///
    /// # Errors
    ///
    /// Propagates [`SearchError`]; the current results are left untouched.
    pub async fn search<C>(
        &mut self,
        client: &C,
        sector: &str,
        department: &str,
    ) -> Result<&SearchResults, SearchError>
    where
        C: RegistryClient,
    {
        let results = search(client, sector, department, self.cap).await?;
        Ok(self.current.insert(results))
    }

    /// Rows of the last successful search, if any search has succeeded.
    #[must_use]
    pub fn current(&self) -> Option<&SearchResults> {
        self.current.as_ref()
    }

    /// `true` when the last successful search returned at least one row.
    #[must_use]
    pub fn has_exportable_rows(&self) -> bool {
        self.current.as_ref().is_some_and(|r| !r.is_empty())
    }
}
