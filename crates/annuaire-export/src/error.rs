use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while exporting a result set.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No destination was given.
    #[error("aucun chemin de fichier fourni")]
    EmptyPath,

    /// The filter left nothing to write; no file was created.
    #[error("Aucune entreprise active à exporter.")]
    NoActiveCompanies,

    /// The workbook could not be built or serialized.
    #[error("échec de génération du classeur '{}': {source}", .path.display())]
    Xlsx {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },

    /// Writing or renaming the file failed.
    #[error("échec d'écriture de '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl ExportError {
    /// Destination the failed export targeted, when one is known.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Xlsx { path, .. } | Self::Io { path, .. } => Some(path),
            Self::EmptyPath | Self::NoActiveCompanies => None,
        }
    }
}
