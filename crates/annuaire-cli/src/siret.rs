//! `siret` command: single-establishment lookup.

use annuaire_core::{normalize, CompanyRow};
use annuaire_sirene::SireneClient;

use crate::render::{format_table, rows_json};
use crate::OutputFormat;

/// Looks up one establishment and prints it.
///
/// # Errors
///
/// Returns an error if the SIRET is malformed or the registry call fails.
pub(crate) async fn run_siret(
    client: &SireneClient,
    siret: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rows: Vec<CompanyRow> = client
        .search_by_siret(siret)
        .await?
        .into_iter()
        .map(normalize)
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows_json(&rows))?),
        OutputFormat::Table if rows.is_empty() => {
            eprintln!("Aucun établissement trouvé pour le SIRET {}", siret.trim());
        }
        OutputFormat::Table => {
            print!("{}", format_table(&rows));
            if let Some(row) = rows.first() {
                println!();
                println!("État : {}", row.status);
            }
        }
    }
    Ok(())
}
