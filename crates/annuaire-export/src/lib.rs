//! Spreadsheet export of active companies.
//!
//! [`filter_active`] keeps the rows whose status reads as active and
//! [`write_spreadsheet`] turns them into a single-sheet `.xlsx` workbook.
//! [`export_active`] chains the two for a whole result set.

pub mod error;
pub mod filter;
pub mod writer;

pub use error::ExportError;
pub use filter::filter_active;
pub use writer::{
    build_records, default_export_filename, export_active, write_spreadsheet, ExportRecord,
    ExportSummary, HEADERS, SHEET_NAME,
};
