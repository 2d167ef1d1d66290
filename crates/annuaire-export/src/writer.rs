//! `.xlsx` serialization of company rows.
//!
//! The workbook is built in memory, written to a temporary file next to the
//! destination and renamed into place, so a failed export never leaves a
//! truncated spreadsheet behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use annuaire_core::{lookup_link, CompanyRow, SearchResults, StatusMatch};
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Workbook, XlsxError};
use tempfile::Builder;

use crate::error::ExportError;
use crate::filter::filter_active;

/// Column headers, in sheet order.
pub const HEADERS: [&str; 10] = [
    "Nom",
    "Adresse",
    "Téléphone",
    "Secteur",
    "SIRET",
    "SIREN",
    "Dirigeant",
    "Effectif",
    "État",
    "Lien Pappers",
];

/// Name of the only worksheet.
pub const SHEET_NAME: &str = "Entreprises";

const COLUMN_WIDTHS: [f64; 10] = [30.0, 40.0, 20.0, 20.0, 18.0, 15.0, 25.0, 15.0, 15.0, 50.0];

/// One spreadsheet line: the full-length row fields plus its lookup link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub sector: String,
    pub siret: String,
    pub siren: String,
    pub leader: String,
    pub headcount: String,
    pub status: String,
    pub lookup_link: String,
}

impl ExportRecord {
    #[must_use]
    pub fn from_row(row: &CompanyRow) -> Self {
        Self {
            name: row.name.clone(),
            address: row.address.clone(),
            phone: row.phone.clone(),
            sector: row.sector.clone(),
            siret: row.siret.clone(),
            siren: row.siren.clone(),
            leader: row.leader.clone(),
            headcount: row.headcount.clone(),
            status: row.status.clone(),
            lookup_link: lookup_link(&row.siren),
        }
    }

    /// Cell values in [`HEADERS`] order.
    fn cells(&self) -> [&str; 10] {
        [
            &self.name,
            &self.address,
            &self.phone,
            &self.sector,
            &self.siret,
            &self.siren,
            &self.leader,
            &self.headcount,
            &self.status,
            &self.lookup_link,
        ]
    }
}

#[must_use]
pub fn build_records(rows: &[CompanyRow]) -> Vec<ExportRecord> {
    rows.iter().map(ExportRecord::from_row).collect()
}

/// Outcome of [`export_active`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    /// Rows written to the sheet.
    pub written: usize,
    /// Rows in the result set before filtering.
    pub considered: usize,
}

/// `entreprises_<YYYYMMDD_HHMMSS>.xlsx`
#[must_use]
pub fn default_export_filename(now: NaiveDateTime) -> String {
    format!("entreprises_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

/// Writes `rows` to a workbook at `path` and returns the number of data rows.
///
/// The destination is replaced atomically and keeps its permissions when it
/// already exists. On failure it is left as it was and the temporary file is
/// removed.
///
/// # Errors
///
/// - [`ExportError::EmptyPath`] if `path` is empty.
/// - [`ExportError::Xlsx`] if the workbook cannot be built.
/// - [`ExportError::Io`] if the temporary file cannot be created, written
///   or renamed.
pub fn write_spreadsheet(rows: &[CompanyRow], path: &Path) -> Result<usize, ExportError> {
    if path.as_os_str().is_empty() {
        return Err(ExportError::EmptyPath);
    }

    let records = build_records(rows);
    let buffer = render_workbook(&records).map_err(|source| ExportError::Xlsx {
        path: path.to_path_buf(),
        source,
    })?;

    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropping `tmp` on an early return deletes the temporary file.
    let mut tmp = temp_file_builder().tempfile_in(dir).map_err(io_err)?;
    tmp.write_all(&buffer).map_err(io_err)?;
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    tracing::info!(path = %path.display(), rows = records.len(), "spreadsheet written");
    Ok(records.len())
}

/// Temporary files are created `0o666` before the umask, like any new file,
/// instead of tempfile's owner-only default.
fn temp_file_builder() -> Builder<'static, 'static> {
    let mut builder = Builder::new();
    builder.prefix(".entreprises").suffix(".xlsx.tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
}

fn render_workbook(records: &[ExportRecord]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, (header, width)) in (0u16..).zip(HEADERS.iter().zip(COLUMN_WIDTHS)) {
        sheet.write_string(0, col, *header)?;
        sheet.set_column_width(col, width)?;
    }

    for (row, record) in (1u32..).zip(records) {
        for (col, value) in (0u16..).zip(record.cells()) {
            if !value.is_empty() {
                sheet.write_string(row, col, value)?;
            }
        }
    }

    workbook.save_to_buffer()
}

/// Filters `results` with `policy` and writes the active rows to `path`.
///
/// # Errors
///
/// - [`ExportError::NoActiveCompanies`] when no row is active; nothing is written.
/// - Any error from [`write_spreadsheet`].
pub fn export_active(
    results: &SearchResults,
    path: &Path,
    policy: StatusMatch,
) -> Result<ExportSummary, ExportError> {
    if path.as_os_str().is_empty() {
        return Err(ExportError::EmptyPath);
    }

    let active = filter_active(&results.rows, policy);
    tracing::debug!(
        considered = results.len(),
        active = active.len(),
        %policy,
        "filtered rows for export"
    );
    if active.is_empty() {
        return Err(ExportError::NoActiveCompanies);
    }

    let written = write_spreadsheet(&active, path)?;
    Ok(ExportSummary {
        path: path.to_path_buf(),
        written,
        considered: results.len(),
    })
}
