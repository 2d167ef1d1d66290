use annuaire_core::CompanyRow;

use super::*;

fn row(name: &str, siren: &str) -> CompanyRow {
    CompanyRow {
        name: name.to_string(),
        address: "3 RUE DU BAC, 75007 PARIS 7".to_string(),
        siret: format!("{siren}00012"),
        siren: siren.to_string(),
        status: "Actif".to_string(),
        ..CompanyRow::default()
    }
}

#[test]
fn parses_minimal_search() {
    let cli = Cli::try_parse_from([
        "annuaire",
        "search",
        "--sector",
        "boulangerie",
        "--department",
        "75",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Search {
            ref sector,
            ref department,
            limit: None,
            format: OutputFormat::Table,
            export: None,
            open: None,
            phones: false,
        } if sector == "boulangerie" && department == "75"
    ));
}

#[test]
fn export_flag_without_value_requests_default_name() {
    let cli = Cli::try_parse_from([
        "annuaire", "search", "--sector", "btp", "--department", "33", "--export",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Search {
            export: Some(None),
            ..
        }
    ));
}

#[test]
fn export_flag_with_path() {
    let cli = Cli::try_parse_from([
        "annuaire",
        "search",
        "--sector",
        "btp",
        "--department",
        "33",
        "--export",
        "out.xlsx",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Search {
            export: Some(Some(ref p)),
            ..
        } if p == &PathBuf::from("out.xlsx")
    ));
}

#[test]
fn parses_limit_format_and_open() {
    let cli = Cli::try_parse_from([
        "annuaire",
        "search",
        "--sector",
        "56.10A",
        "--department",
        "69",
        "--limit",
        "50",
        "--format",
        "json",
        "--open",
        "2",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Search {
            limit: Some(50),
            format: OutputFormat::Json,
            open: Some(2),
            ..
        }
    ));
}

#[test]
fn parses_phones_flag() {
    let cli = Cli::try_parse_from([
        "annuaire", "search", "--sector", "btp", "--department", "33", "--phones",
    ])
    .unwrap();
    assert!(matches!(cli.command, Commands::Search { phones: true, .. }));
}

#[test]
fn zero_limit_is_rejected() {
    let result = Cli::try_parse_from([
        "annuaire", "search", "--sector", "btp", "--department", "33", "--limit", "0",
    ]);
    assert!(result.is_err());
}

#[test]
fn search_requires_sector_and_department() {
    assert!(Cli::try_parse_from(["annuaire", "search", "--sector", "btp"]).is_err());
    assert!(Cli::try_parse_from(["annuaire", "search", "--department", "33"]).is_err());
}

#[test]
fn parses_siret_command() {
    let cli = Cli::try_parse_from(["annuaire", "siret", "12345678900011"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Siret {
            ref siret,
            format: OutputFormat::Table,
        } if siret == "12345678900011"
    ));
}

#[test]
fn no_command_is_an_error() {
    assert!(Cli::try_parse_from(["annuaire"]).is_err());
}

#[test]
fn table_truncates_long_names_and_marks_links() {
    let long = "N".repeat(120);
    let table = render::format_table(&[row(&long, "123456789"), row("Court", "")]);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("N°"));
    assert!(lines[1].contains(&"N".repeat(80)));
    assert!(!lines[1].contains(&"N".repeat(81)));
    assert!(lines[1].trim_end().ends_with("Ouvrir"));
    assert!(lines[2].trim_end().ends_with('-'));
}

#[test]
fn json_keeps_full_values_and_links() {
    let long = "N".repeat(120);
    let value = render::rows_json(&[row(&long, "123456789")]);
    let first = &value[0];

    assert_eq!(first["index"], 1);
    assert_eq!(first["name"].as_str().map(str::len), Some(120));
    assert_eq!(
        first["lookup_link"],
        "https://www.pappers.fr/recherche?q=123456789"
    );
    assert!(first["phone_directory_link"]
        .as_str()
        .is_some_and(|l| l.contains("/75007/")));
    assert!(first["opco_link"]
        .as_str()
        .is_some_and(|l| l.ends_with("siret=12345678900012")));
}

#[test]
fn summary_wording() {
    assert_eq!(render::result_summary(0), "Aucune entreprise trouvée");
    assert_eq!(render::result_summary(1), "1 entreprise trouvée");
    assert_eq!(render::result_summary(12), "12 entreprises trouvées");
}
