//! Active-status filter applied before export.

use annuaire_core::{CompanyRow, StatusMatch};

/// Keeps the rows `policy` considers active, in their original order.
///
/// No deduplication happens and an empty result is not an error. Applying
/// the filter to its own output returns the same rows.
#[must_use]
pub fn filter_active(rows: &[CompanyRow], policy: StatusMatch) -> Vec<CompanyRow> {
    rows.iter()
        .filter(|row| policy.is_active(&row.status))
        .cloned()
        .collect()
}
