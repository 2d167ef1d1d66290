//! Normalization of [`RawEntry`] records into the canonical [`CompanyRow`].
//!
//! This is the only place where missing upstream fields are resolved; every
//! downstream consumer sees plain strings, empty when the registry had
//! nothing to say.

use serde::Serialize;

use crate::entry::RawEntry;
use crate::links::lookup_link;

/// Maximum characters of name and address shown in a results table.
pub const DISPLAY_NAME_CHARS: usize = 80;
/// Maximum characters of the leader name shown in a results table.
pub const DISPLAY_LEADER_CHARS: usize = 50;

/// Table marker for rows that have a lookup link.
pub const LOOKUP_AVAILABLE: &str = "Ouvrir";
/// Table marker for rows without a lookup link.
pub const LOOKUP_UNAVAILABLE: &str = "-";

/// A registry entry with every field resolved. Never mutated after creation;
/// export reads these full-length values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanyRow {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub sector: String,
    pub siret: String,
    pub siren: String,
    pub leader: String,
    pub headcount: String,
    pub status: String,
}

/// Bounded copy of a [`CompanyRow`] for table presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// 1-based position in the result set.
    pub index: usize,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub sector: String,
    pub siret: String,
    pub siren: String,
    pub leader: String,
    pub headcount: String,
    /// [`LOOKUP_AVAILABLE`] or [`LOOKUP_UNAVAILABLE`].
    pub lookup: &'static str,
}

/// Converts a [`RawEntry`] into a [`CompanyRow`], defaulting absent fields to `""`.
///
/// Status is carried verbatim; no trimming or case folding happens here.
#[must_use]
pub fn normalize(entry: RawEntry) -> CompanyRow {
    CompanyRow {
        name: entry.name.unwrap_or_default(),
        address: entry.address.unwrap_or_default(),
        phone: entry.phone.unwrap_or_default(),
        sector: entry.sector.unwrap_or_default(),
        siret: entry.siret.unwrap_or_default(),
        siren: entry.siren.unwrap_or_default(),
        leader: entry.leader.unwrap_or_default(),
        headcount: entry.headcount.unwrap_or_default(),
        status: entry.status.unwrap_or_default(),
    }
}

/// Builds the presentation copy of `row` at 1-based position `index`.
#[must_use]
pub fn display_row(index: usize, row: &CompanyRow) -> DisplayRow {
    let lookup = if lookup_link(&row.siren).is_empty() {
        LOOKUP_UNAVAILABLE
    } else {
        LOOKUP_AVAILABLE
    };

    DisplayRow {
        index,
        name: truncate_chars(&row.name, DISPLAY_NAME_CHARS),
        address: truncate_chars(&row.address, DISPLAY_NAME_CHARS),
        phone: row.phone.clone(),
        sector: row.sector.clone(),
        siret: row.siret.clone(),
        siren: row.siren.clone(),
        leader: truncate_chars(&row.leader, DISPLAY_LEADER_CHARS),
        headcount: row.headcount.clone(),
        lookup,
    }
}

/// Returns at most `max` characters of `s`, cut on a character boundary.
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}
