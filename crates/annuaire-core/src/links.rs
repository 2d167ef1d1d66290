//! External lookup URLs derived from company identifiers.
//!
//! All builders are pure: they only construct URLs, never request them.
//! An empty string means "no link".

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const PAPPERS_SEARCH_URL: &str = "https://www.pappers.fr/recherche";
const OPCO_LOOKUP_URL: &str = "https://quel-est-mon-opco.francecompetences.fr/";

/// Minimum identifier length accepted by [`lookup_link`].
pub const SIREN_LEN: usize = 9;
const SIRET_LEN: usize = 14;

/// Characters left untouched in a query value or path segment.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Leadership lookup on Pappers for a legal entity.
///
/// Empty when `siren` is empty or shorter than [`SIREN_LEN`] characters.
/// The identifier is percent-encoded, so digits come through verbatim.
#[must_use]
pub fn lookup_link(siren: &str) -> String {
    if siren.chars().count() < SIREN_LEN {
        return String::new();
    }
    format!(
        "{PAPPERS_SEARCH_URL}?q={}",
        utf8_percent_encode(siren, COMPONENT)
    )
}

/// Origin of the PagesJaunes site used by [`phone_directory_link`].
pub const PAGESJAUNES_BASE_URL: &str = "https://www.pagesjaunes.fr";

/// Phone-directory search on PagesJaunes, keyed by postal code and name.
///
/// Empty when `name` is blank or `address` holds no standalone 5-digit
/// postal code.
#[must_use]
pub fn phone_directory_link(name: &str, address: &str) -> String {
    phone_directory_link_at(PAGESJAUNES_BASE_URL, name, address)
}

/// [`phone_directory_link`] against another origin, such as a mirror or a
/// local test server.
#[must_use]
pub fn phone_directory_link_at(base_url: &str, name: &str, address: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return String::new();
    }
    let Some(postal_code) = find_postal_code(address) else {
        return String::new();
    };
    format!(
        "{}/recherche/{postal_code}/{}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(name, COMPONENT)
    )
}

/// Training-fund (OPCO) lookup on France Compétences for an establishment.
///
/// Empty unless the trimmed `siret` is exactly 14 ASCII digits.
#[must_use]
pub fn opco_link(siret: &str) -> String {
    let siret = siret.trim();
    if siret.len() != SIRET_LEN || !siret.bytes().all(|b| b.is_ascii_digit()) {
        return String::new();
    }
    format!("{OPCO_LOOKUP_URL}?siret={siret}")
}

/// First run of exactly five ASCII digits in `address`.
fn find_postal_code(address: &str) -> Option<&str> {
    let bytes = address.as_bytes();
    let mut start = None;
    for (i, b) in bytes.iter().enumerate() {
        match (b.is_ascii_digit(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                if i - s == 5 {
                    return Some(&address[s..i]);
                }
                start = None;
            }
            _ => {}
        }
    }
    start
        .filter(|&s| bytes.len() - s == 5)
        .map(|s| &address[s..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_link_embeds_full_siren() {
        let link = lookup_link("123456789");
        assert_eq!(link, "https://www.pappers.fr/recherche?q=123456789");
        assert!(link.contains("123456789"));
    }

    #[test]
    fn lookup_link_empty_for_short_or_missing_siren() {
        assert_eq!(lookup_link(""), "");
        assert_eq!(lookup_link("12345"), "");
        assert_eq!(lookup_link("12345678"), "");
    }

    #[test]
    fn lookup_link_accepts_longer_identifiers() {
        assert!(lookup_link("12345678900011").contains("12345678900011"));
    }

    #[test]
    fn lookup_link_encodes_reserved_characters() {
        let link = lookup_link("123 456&789");
        assert_eq!(link, "https://www.pappers.fr/recherche?q=123%20456%26789");
    }

    #[test]
    fn lookup_link_empty_iff_shorter_than_nine() {
        for len in 1..=15 {
            let siren = "7".repeat(len);
            let link = lookup_link(&siren);
            assert_eq!(link.is_empty(), len < SIREN_LEN, "len {len}");
            if len >= SIREN_LEN {
                assert!(link.contains(&siren));
            }
        }
    }

    #[test]
    fn phone_directory_link_uses_postal_code_and_name() {
        let link = phone_directory_link(" Café Lune ", "4 Rue Neuve, 75011 Paris");
        assert_eq!(link, "https://www.pagesjaunes.fr/recherche/75011/Caf%C3%A9%20Lune");
    }

    #[test]
    fn phone_directory_link_needs_name_and_postal_code() {
        assert_eq!(phone_directory_link("", "75011 Paris"), "");
        assert_eq!(phone_directory_link("Café", "Paris"), "");
        assert_eq!(phone_directory_link("Café", "123456 Paris"), "");
    }

    #[test]
    fn phone_directory_link_at_other_origin() {
        assert_eq!(
            phone_directory_link_at("http://127.0.0.1:8080/", "Boulangerie", "75011 Paris"),
            "http://127.0.0.1:8080/recherche/75011/Boulangerie"
        );
    }

    #[test]
    fn find_postal_code_at_end_of_address() {
        assert_eq!(find_postal_code("Lieu-dit Le Bourg 29200"), Some("29200"));
        assert_eq!(find_postal_code("12 Rue X, 1234"), None);
    }

    #[test]
    fn opco_link_requires_fourteen_digits() {
        assert_eq!(
            opco_link(" 12345678900011 "),
            "https://quel-est-mon-opco.francecompetences.fr/?siret=12345678900011"
        );
        assert_eq!(opco_link("123456789"), "");
        assert_eq!(opco_link("1234567890001A"), "");
        assert_eq!(opco_link(""), "");
    }
}
