//! `search` command: query, display, optional export and browser hand-off.

use std::path::{Path, PathBuf};

use annuaire_core::{lookup_link, AppConfig, RegistryClient, SearchResults, Session};
use annuaire_export::{default_export_filename, export_active, ExportError};
use anyhow::Context;
use chrono::Local;

use crate::render::{format_table, result_summary, rows_json};
use crate::OutputFormat;

#[derive(Debug)]
pub(crate) struct SearchArgs {
    pub sector: String,
    pub department: String,
    pub limit: Option<usize>,
    pub format: OutputFormat,
    /// `Some(None)` asks for the default file name.
    pub export: Option<Option<PathBuf>>,
    pub open: Option<usize>,
}

/// Runs a search and acts on the results.
///
/// # Errors
///
/// Returns an error if the inputs are blank, the registry call fails, the
/// export cannot be written, or the requested row has no link to open.
pub(crate) async fn run_search<C>(
    config: &AppConfig,
    client: &C,
    args: SearchArgs,
) -> anyhow::Result<()>
where
    C: RegistryClient,
{
    let mut session = Session::new(args.limit.unwrap_or(config.result_cap));
    let results = session.search(client, &args.sector, &args.department).await?;

    match args.format {
        OutputFormat::Table => {
            if !results.is_empty() {
                print!("{}", format_table(&results.rows));
            }
            eprintln!("{}", result_summary(results.len()));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows_json(&results.rows))?);
        }
    }

    if let Some(destination) = args.export {
        if results.is_empty() {
            eprintln!("Aucun résultat à exporter");
        } else {
            let path = destination.unwrap_or_else(|| default_export_path(&config.export_dir));
            export(results, &path, config)?;
        }
    }

    if let Some(index) = args.open {
        open_lookup(results, index)?;
    }

    Ok(())
}

fn default_export_path(dir: &Path) -> PathBuf {
    dir.join(default_export_filename(Local::now().naive_local()))
}

fn export(results: &SearchResults, path: &Path, config: &AppConfig) -> anyhow::Result<()> {
    match export_active(results, path, config.status_match) {
        Ok(summary) => {
            eprintln!(
                "Export réussi : {} entreprise(s) active(s) sur {} dans {}",
                summary.written,
                summary.considered,
                summary.path.display()
            );
            Ok(())
        }
        Err(ExportError::NoActiveCompanies) => {
            eprintln!("Aucune entreprise active à exporter");
            Ok(())
        }
        Err(e) => Err(e).context("export impossible"),
    }
}

/// Opens the lookup page of the 1-based row `index` in the default browser.
fn open_lookup(results: &SearchResults, index: usize) -> anyhow::Result<()> {
    let row = index
        .checked_sub(1)
        .and_then(|i| results.rows.get(i))
        .ok_or_else(|| {
            anyhow::anyhow!("ligne {index} inexistante ({} résultat(s))", results.len())
        })?;

    let url = lookup_link(&row.siren);
    if url.is_empty() {
        anyhow::bail!("aucun lien Pappers pour la ligne {index} (SIREN manquant)");
    }

    tracing::info!(index, %url, "opening lookup link");
    open::that(&url).with_context(|| format!("impossible d'ouvrir {url}"))?;
    Ok(())
}
