//! Business-status matching.
//!
//! The registry reports an establishment as operating with the literal label
//! [`ACTIVE_STATUS`]. Matching is exact after trimming unless the operator
//! opts into [`StatusMatch::CaseInsensitive`].

use std::str::FromStr;

/// Canonical label of an operating establishment.
pub const ACTIVE_STATUS: &str = "Actif";

/// How a row's status is compared against [`ACTIVE_STATUS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusMatch {
    /// `status.trim() == "Actif"`, byte for byte.
    #[default]
    Exact,
    /// Trimmed and lowercased before comparing, so `"ACTIF"` and `"actif"` pass.
    CaseInsensitive,
}

impl StatusMatch {
    /// Returns `true` if `status` denotes an active establishment under this policy.
    #[must_use]
    pub fn is_active(self, status: &str) -> bool {
        let trimmed = status.trim();
        match self {
            StatusMatch::Exact => trimmed == ACTIVE_STATUS,
            StatusMatch::CaseInsensitive => trimmed.to_lowercase() == ACTIVE_STATUS.to_lowercase(),
        }
    }
}

impl std::fmt::Display for StatusMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusMatch::Exact => write!(f, "exact"),
            StatusMatch::CaseInsensitive => write!(f, "case-insensitive"),
        }
    }
}

impl FromStr for StatusMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "exact" => Ok(StatusMatch::Exact),
            "case-insensitive" => Ok(StatusMatch::CaseInsensitive),
            other => Err(format!(
                "expected \"exact\" or \"case-insensitive\", got {other:?}"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_accepts_surrounding_whitespace() {
        assert!(StatusMatch::Exact.is_active("Actif"));
        assert!(StatusMatch::Exact.is_active("  Actif\t"));
    }

    #[test]
    fn exact_rejects_other_casing() {
        assert!(!StatusMatch::Exact.is_active("actif"));
        assert!(!StatusMatch::Exact.is_active("ACTIF"));
        assert!(!StatusMatch::Exact.is_active("Radié"));
        assert!(!StatusMatch::Exact.is_active(""));
    }

    #[test]
    fn case_insensitive_accepts_other_casing() {
        assert!(StatusMatch::CaseInsensitive.is_active("ACTIF "));
        assert!(StatusMatch::CaseInsensitive.is_active("actif"));
        assert!(!StatusMatch::CaseInsensitive.is_active("Fermé"));
    }

    #[test]
    fn parses_and_displays() {
        assert_eq!("exact".parse::<StatusMatch>(), Ok(StatusMatch::Exact));
        assert_eq!(
            "case-insensitive".parse::<StatusMatch>(),
            Ok(StatusMatch::CaseInsensitive)
        );
        assert!("loose".parse::<StatusMatch>().is_err());
        assert_eq!(StatusMatch::CaseInsensitive.to_string(), "case-insensitive");
    }
}
