mod render;
mod search;
mod siret;

use std::path::PathBuf;
use std::process::ExitCode;

use annuaire_core::AppConfig;
use annuaire_sirene::{ClientOptions, PhoneDirectory, SireneClient, WithPhones};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "annuaire")]
#[command(about = "Recherche d'entreprises dans le registre SIRENE et export Excel")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search companies by sector and department
    Search {
        /// Company-name prefix or NAF code (e.g. "boulangerie", "56.10A")
        #[arg(long)]
        sector: String,
        /// Department number or postal code (e.g. "75", "69002")
        #[arg(long)]
        department: String,
        /// Maximum number of results (defaults to `ANNUAIRE_RESULT_CAP`)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        limit: Option<u32>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Export active companies to an .xlsx file; without a value the file
        /// is named after the current time in `ANNUAIRE_EXPORT_DIR`
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        export: Option<Option<PathBuf>>,
        /// Open the Pappers page of result N (1-based) in the browser
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
        open: Option<u32>,
        /// Look up missing phone numbers on PagesJaunes (one request per company)
        #[arg(long)]
        phones: bool,
    },
    /// Look up a single establishment by its 14-digit SIRET
    Siret {
        siret: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn to_usize(n: u32) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = annuaire_core::load_app_config_from_env()?;
    init_tracing(&config)?;
    tracing::debug!(?config, "configuration loaded");

    if config.is_degraded() {
        eprintln!(
            "avertissement : SIRENE_API_KEY absente, les résultats affichés sont des données de démonstration"
        );
    }

    let client = SireneClient::new(
        config.sirene_api_key.as_deref(),
        ClientOptions::from_app_config(&config),
    )?;

    match cli.command {
        Commands::Search {
            sector,
            department,
            limit,
            format,
            export,
            open,
            phones,
        } => {
            let args = search::SearchArgs {
                sector,
                department,
                limit: limit.map(to_usize),
                format,
                export,
                open: open.map(to_usize),
            };
            if phones {
                let directory = PhoneDirectory::new(config.request_timeout_secs)?;
                let client = WithPhones::new(client, directory);
                search::run_search(&config, &client, args).await
            } else {
                search::run_search(&config, &client, args).await
            }
        }
        Commands::Siret { siret, format } => siret::run_siret(&client, &siret, format).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("erreur : {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests;
