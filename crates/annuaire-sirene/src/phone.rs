//! Best-effort phone numbers from the PagesJaunes search page.
//!
//! INSEE does not publish phone numbers. [`PhoneDirectory`] fetches the
//! PagesJaunes results page for a company and scrapes the first number it
//! finds. [`WithPhones`] wraps any [`RegistryClient`] and fills the phone of
//! each returned entry that has none; a failed lookup leaves it empty.

use std::sync::LazyLock;
use std::time::Duration;

use annuaire_core::{phone_directory_link_at, RawEntry, RegistryClient, PAGESJAUNES_BASE_URL};
use regex::Regex;
use reqwest::{Client, StatusCode};

use crate::error::SireneError;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const HTML_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

static TEL_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tel:([0-9\s.\-+]+)").expect("valid tel regex"));
static FRENCH_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:0|\+33)[0-9\s.]{8,}").expect("valid phone regex"));

/// First phone number in a results page: a `tel:` link if present, else
/// anything shaped like a French number.
#[must_use]
pub fn extract_phone(html: &str) -> Option<String> {
    let from_link = TEL_LINK
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| s.chars().any(|c| c.is_ascii_digit()));

    from_link
        .or_else(|| FRENCH_NUMBER.find(html).map(|m| m.as_str().trim()))
        .map(str::to_string)
}

/// HTTP client for PagesJaunes results pages.
pub struct PhoneDirectory {
    client: Client,
    base_url: String,
}

impl PhoneDirectory {
    /// Client for the public site.
    ///
    /// # Errors
    ///
    /// Returns [`SireneError::Http`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, SireneError> {
        Self::with_base_url(PAGESJAUNES_BASE_URL, timeout_secs)
    }

    /// # Errors
    ///
    /// Returns [`SireneError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, SireneError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(BROWSER_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Looks up the phone of `name` at `address`.
    ///
    /// `Ok(None)` when no search link can be built (blank name, no postal
    /// code), when the page does not exist, or when it holds no number.
    ///
    /// # Errors
    ///
    /// Transport failures and non-404 error statuses.
    pub async fn lookup(&self, name: &str, address: &str) -> Result<Option<String>, SireneError> {
        let url = phone_directory_link_at(&self.base_url, name, address);
        if url.is_empty() {
            return Ok(None);
        }

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, HTML_ACCEPT)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            s if !s.is_success() => {
                return Err(SireneError::UnexpectedStatus {
                    status: s.as_u16(),
                    url,
                })
            }
            _ => {}
        }

        let html = response.text().await?;
        Ok(extract_phone(&html))
    }
}

/// A [`RegistryClient`] whose entries get phone numbers from a
/// [`PhoneDirectory`] when the registry has none.
pub struct WithPhones<C> {
    inner: C,
    directory: PhoneDirectory,
}

impl<C> WithPhones<C> {
    #[must_use]
    pub fn new(inner: C, directory: PhoneDirectory) -> Self {
        Self { inner, directory }
    }
}

impl<C> RegistryClient for WithPhones<C>
where
    C: RegistryClient + Sync,
{
    type Error = C::Error;

    async fn search_by_sector_and_department(
        &self,
        sector: &str,
        department: &str,
        limit: usize,
    ) -> Result<Vec<RawEntry>, C::Error> {
        let mut entries = self
            .inner
            .search_by_sector_and_department(sector, department, limit)
            .await?;

        let mut found = 0usize;
        for entry in &mut entries {
            if entry.phone.as_deref().is_some_and(|p| !p.trim().is_empty()) {
                continue;
            }
            let name = entry.name.as_deref().unwrap_or_default();
            let address = entry.address.as_deref().unwrap_or_default();
            match self.directory.lookup(name, address).await {
                Ok(Some(phone)) => {
                    entry.phone = Some(phone);
                    found += 1;
                }
                Ok(None) => {}
                Err(e) => tracing::debug!(name, error = %e, "phone lookup failed"),
            }
        }

        tracing::info!(entries = entries.len(), found, "phone enrichment finished");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tel_link() {
        let html = r#"<a href="tel:01 23 45 67 89" class="num">Appeler</a>"#;
        assert_eq!(extract_phone(html).as_deref(), Some("01 23 45 67 89"));
    }

    #[test]
    fn tel_link_is_case_insensitive_and_keeps_prefix() {
        let html = r#"<a href="TEL:+33.1.23.45.67.89">"#;
        assert_eq!(extract_phone(html).as_deref(), Some("+33.1.23.45.67.89"));
    }

    #[test]
    fn falls_back_to_french_number_shape() {
        let html = "<span>Téléphone : 04 78 00 00 00</span>";
        assert_eq!(extract_phone(html).as_deref(), Some("04 78 00 00 00"));
    }

    #[test]
    fn empty_tel_link_falls_back() {
        let html = r#"<a href="tel: ">x</a> <p>05 56 00 00 00</p>"#;
        assert_eq!(extract_phone(html).as_deref(), Some("05 56 00 00 00"));
    }

    #[test]
    fn page_without_number_yields_none() {
        assert_eq!(extract_phone("<p>Aucun résultat</p>"), None);
        assert_eq!(extract_phone(""), None);
    }
}
