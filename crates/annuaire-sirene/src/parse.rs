//! Conversion of SIRENE establishments into [`RawEntry`] records.
//!
//! The `/siret` endpoint returns establishments; operators want one line per
//! company. Establishments are grouped by SIREN, the headquarters of each
//! group supplies the address and establishment status, and the legal unit
//! supplies the name, sector and headcount band.

use annuaire_core::RawEntry;

use crate::types::{Establishment, LegalUnit};

/// Label used when INSEE sends no headcount band, or one we do not know.
pub const DEFAULT_HEADCOUNT_LABEL: &str = "0 à 1";

/// Label used when no administrative state is known at all.
pub const UNKNOWN_STATUS_LABEL: &str = "Inconnu";

/// Band codes of legal units with 50 employees or more.
const LARGE_COMPANY_BANDS: &[&str] = &["21", "22", "31", "32", "41", "42", "51", "52", "53"];

/// Maps an INSEE `tranche d'effectifs` code to its French label.
#[must_use]
pub fn headcount_label(code: &str) -> &'static str {
    match code {
        "NN" => "0 à 1",
        "00" => "0 salarié (ayant employé des salariés au cours de l'année)",
        "01" => "1 ou 2 salariés",
        "02" => "3 à 5 salariés",
        "03" => "6 à 9 salariés",
        "11" => "10 à 19 salariés",
        "12" => "20 à 49 salariés",
        "21" => "50 à 99 salariés",
        "22" => "100 à 199 salariés",
        "31" => "200 à 249 salariés",
        "32" => "250 à 499 salariés",
        "41" => "500 à 999 salariés",
        "42" => "1 000 à 1 999 salariés",
        "51" => "2 000 à 4 999 salariés",
        "52" => "5 000 à 9 999 salariés",
        "53" => "10 000 salariés et plus",
        _ => DEFAULT_HEADCOUNT_LABEL,
    }
}

/// Maps an INSEE administrative-state code (`A`, `F`, `C`) to its French label.
///
/// Unknown codes are passed through; an empty code yields [`UNKNOWN_STATUS_LABEL`].
#[must_use]
pub fn status_label(code: &str) -> String {
    match code {
        "A" => "Actif".to_string(),
        "F" => "Fermé".to_string(),
        "C" => "Cessé".to_string(),
        "" => UNKNOWN_STATUS_LABEL.to_string(),
        other => other.to_string(),
    }
}

/// Establishments sharing one SIREN, in the order they were first seen.
#[derive(Debug)]
pub struct SirenGroup {
    pub siren: String,
    pub establishments: Vec<Establishment>,
}

impl SirenGroup {
    /// Legal unit attached to the first establishment carrying one.
    #[must_use]
    pub fn legal_unit(&self) -> Option<&LegalUnit> {
        self.establishments
            .iter()
            .find_map(|e| e.unite_legale.as_ref())
    }

    /// Headquarters among the returned establishments, if recognisable.
    ///
    /// An establishment qualifies when its SIRET is the legal unit's declared
    /// headquarters, when it carries the `etablissementSiege` flag, or when
    /// its SIRET ends in `000`. The first qualifying one wins.
    #[must_use]
    pub fn headquarters(&self) -> Option<&Establishment> {
        let declared = self
            .legal_unit()
            .and_then(|u| u.siret_unite_legale.as_deref())
            .filter(|s| !s.is_empty());

        self.establishments.iter().find(|e| {
            let siret = e.siret.as_deref().unwrap_or_default();
            declared.is_some_and(|d| d == siret) || e.etablissement_siege || siret.ends_with("000")
        })
    }
}

/// Resolves the SIREN of an establishment.
///
/// Prefers the embedded legal unit, then the first nine characters of the
/// SIRET, then the establishment's own `siren` field.
#[must_use]
pub fn siren_of(establishment: &Establishment) -> Option<String> {
    if let Some(siren) = establishment
        .unite_legale
        .as_ref()
        .and_then(|u| u.siren.as_deref())
        .filter(|s| !s.is_empty())
    {
        return Some(siren.to_string());
    }
    if let Some(prefix) = establishment
        .siret
        .as_deref()
        .and_then(|s| s.get(..9))
    {
        return Some(prefix.to_string());
    }
    establishment
        .siren
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Groups establishments by SIREN, preserving first-seen order.
///
/// Establishments whose SIREN cannot be resolved are dropped.
#[must_use]
pub fn group_by_siren(establishments: Vec<Establishment>) -> Vec<SirenGroup> {
    let mut groups: Vec<SirenGroup> = Vec::new();
    for establishment in establishments {
        let Some(siren) = siren_of(&establishment) else {
            tracing::debug!(siret = ?establishment.siret, "skipping establishment without SIREN");
            continue;
        };
        match groups.iter_mut().find(|g| g.siren == siren) {
            Some(group) => group.establishments.push(establishment),
            None => groups.push(SirenGroup {
                siren,
                establishments: vec![establishment],
            }),
        }
    }
    groups
}

/// Builds the company entry for `group`, using `headquarters` for address
/// and establishment status.
///
/// Returns `None` when `small_companies_only` is set and the legal unit
/// declares 50 employees or more.
#[must_use]
pub fn build_entry(
    group: &SirenGroup,
    headquarters: &Establishment,
    small_companies_only: bool,
) -> Option<RawEntry> {
    let unit = group.legal_unit();

    let band = unit
        .and_then(|u| u.tranche_effectifs_unite_legale.as_deref())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headquarters
                .tranche_effectifs_etablissement
                .as_deref()
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_default();

    if small_companies_only && LARGE_COMPANY_BANDS.contains(&band) {
        tracing::debug!(siren = %group.siren, band, "skipping company with 50+ employees");
        return None;
    }

    let name = unit
        .and_then(|u| {
            u.denomination_unite_legale
                .as_deref()
                .filter(|s| !s.is_empty())
                .or(u.nom_unite_legale.as_deref())
        })
        .unwrap_or_default();

    let sector = unit
        .and_then(|u| u.activite_principale_unite_legale.as_deref())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            current_establishment_period(headquarters)
                .and_then(|p| p.activite_principale_etablissement.as_deref())
        })
        .unwrap_or_default();

    Some(RawEntry {
        name: Some(name.to_string()),
        address: Some(format_address(headquarters)),
        phone: None,
        sector: Some(sector.to_string()),
        siret: headquarters.siret.clone(),
        siren: Some(group.siren.clone()),
        leader: None,
        headcount: Some(headcount_label(band).to_string()),
        status: Some(combined_status(unit, headquarters)),
    })
}

/// `"<n° type voie>, <code postal> <commune>"`, omitting blank parts.
#[must_use]
pub fn format_address(establishment: &Establishment) -> String {
    let Some(addr) = establishment.adresse_etablissement.as_ref() else {
        return String::new();
    };

    let join = |parts: &[Option<&String>]| -> String {
        parts
            .iter()
            .filter_map(|p| p.map(|s| s.trim()))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    };

    let street = join(&[
        addr.numero_voie_etablissement.as_ref(),
        addr.type_voie_etablissement.as_ref(),
        addr.libelle_voie_etablissement.as_ref(),
    ]);
    let locality = join(&[
        addr.code_postal_etablissement.as_ref(),
        addr.libelle_commune_etablissement.as_ref(),
    ]);

    [street, locality]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `Actif` only when both the legal unit and the headquarters are active;
/// otherwise the label of whichever is not (establishment first).
fn combined_status(unit: Option<&LegalUnit>, headquarters: &Establishment) -> String {
    let unit_code = unit.map(legal_unit_state).unwrap_or_default();
    let establishment_code = establishment_state(headquarters);

    match (unit_code, establishment_code) {
        ("A", "A") => status_label("A"),
        (_, code) if !code.is_empty() && code != "A" => status_label(code),
        (code, _) if !code.is_empty() && code != "A" => status_label(code),
        _ => UNKNOWN_STATUS_LABEL.to_string(),
    }
}

fn legal_unit_state(unit: &LegalUnit) -> &str {
    unit.etat_administratif_unite_legale
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| {
            let periods = &unit.periodes_unite_legale;
            periods
                .iter()
                .find(|p| p.date_fin.is_none())
                .or_else(|| periods.first())
                .and_then(|p| p.etat_administratif_unite_legale.as_deref())
        })
        .unwrap_or_default()
}

fn establishment_state(establishment: &Establishment) -> &str {
    establishment
        .etat_administratif_etablissement
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| {
            current_establishment_period(establishment)
                .and_then(|p| p.etat_administratif_etablissement.as_deref())
        })
        .unwrap_or_default()
}

/// The open period (no `dateFin`), or the first one listed.
fn current_establishment_period(
    establishment: &Establishment,
) -> Option<&crate::types::EstablishmentPeriod> {
    let periods = &establishment.periodes_etablissement;
    periods
        .iter()
        .find(|p| p.date_fin.is_none())
        .or_else(|| periods.first())
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
