//! Fixture entries served when no API key is configured.

use annuaire_core::RawEntry;

/// Two synthetic, active companies shaped after the query.
#[must_use]
pub fn demo_entries(sector: &str, department: &str) -> Vec<RawEntry> {
    let label = capitalize(sector);
    vec![
        RawEntry {
            name: Some(format!("Entreprise {label} A ({department})")),
            address: Some(format!("10 Rue de la Demo, 7500{department} Ville-Demo")),
            phone: Some("01 23 45 67 89".to_string()),
            sector: Some(sector.to_string()),
            siret: Some("12345678900011".to_string()),
            siren: Some("123456789".to_string()),
            leader: Some("M. Jean Dupont".to_string()),
            headcount: Some("6 à 9 salariés".to_string()),
            status: Some("Actif".to_string()),
        },
        RawEntry {
            name: Some(format!("Entreprise {label} B ({department})")),
            address: Some(format!("25 Avenue Exemple, 7500{department} Ville-Exemple")),
            phone: Some("01 98 76 54 32".to_string()),
            sector: Some(sector.to_string()),
            siret: Some("98765432100022".to_string()),
            siren: Some("987654321".to_string()),
            leader: Some("Mme Marie Martin".to_string()),
            headcount: Some("10 à 19 salariés".to_string()),
            status: Some("Actif".to_string()),
        },
    ]
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
