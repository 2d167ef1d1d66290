//! INSEE SIRENE API response types.
//!
//! Models the subset of the `/siret` endpoint payload that the parser reads.
//! Every field is optional: the API omits keys freely depending on the
//! entity type and on which fields were requested.

use serde::{Deserialize, Deserializer};

/// Envelope of a `/siret` search response.
#[derive(Debug, Default, Deserialize)]
pub struct SiretResponse {
    #[serde(default)]
    pub etablissements: Vec<Establishment>,
}

/// One establishment (`établissement`), identified by its SIRET.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Establishment {
    #[serde(default)]
    pub siren: Option<String>,
    #[serde(default)]
    pub siret: Option<String>,
    /// Headquarters flag; sent as a JSON boolean, occasionally as `"true"`.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub etablissement_siege: bool,
    #[serde(default)]
    pub tranche_effectifs_etablissement: Option<String>,
    #[serde(default)]
    pub etat_administratif_etablissement: Option<String>,
    #[serde(default)]
    pub unite_legale: Option<LegalUnit>,
    #[serde(default)]
    pub adresse_etablissement: Option<EstablishmentAddress>,
    #[serde(default)]
    pub periodes_etablissement: Vec<EstablishmentPeriod>,
}

/// Legal-unit (`unité légale`) fields embedded in an establishment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalUnit {
    #[serde(default)]
    pub siren: Option<String>,
    #[serde(default)]
    pub siret_unite_legale: Option<String>,
    #[serde(default)]
    pub denomination_unite_legale: Option<String>,
    #[serde(default)]
    pub nom_unite_legale: Option<String>,
    #[serde(default)]
    pub activite_principale_unite_legale: Option<String>,
    #[serde(default)]
    pub tranche_effectifs_unite_legale: Option<String>,
    #[serde(default)]
    pub etat_administratif_unite_legale: Option<String>,
    #[serde(default)]
    pub periodes_unite_legale: Vec<LegalUnitPeriod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalUnitPeriod {
    #[serde(default)]
    pub date_fin: Option<String>,
    #[serde(default)]
    pub etat_administratif_unite_legale: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentPeriod {
    #[serde(default)]
    pub date_fin: Option<String>,
    #[serde(default)]
    pub etat_administratif_etablissement: Option<String>,
    #[serde(default)]
    pub activite_principale_etablissement: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentAddress {
    #[serde(default)]
    pub numero_voie_etablissement: Option<String>,
    #[serde(default)]
    pub type_voie_etablissement: Option<String>,
    #[serde(default)]
    pub libelle_voie_etablissement: Option<String>,
    #[serde(default)]
    pub code_postal_etablissement: Option<String>,
    #[serde(default)]
    pub libelle_commune_etablissement: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Text(String),
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<BoolOrString>::deserialize(deserializer)? {
        Some(BoolOrString::Bool(b)) => b,
        Some(BoolOrString::Text(s)) => s.eq_ignore_ascii_case("true"),
        None => false,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_establishment() {
        let e: Establishment = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(e.siret.is_none());
        assert!(!e.etablissement_siege);
        assert!(e.periodes_etablissement.is_empty());
    }

    #[test]
    fn headquarters_flag_accepts_string() {
        let e: Establishment =
            serde_json::from_value(serde_json::json!({ "etablissementSiege": "true" })).unwrap();
        assert!(e.etablissement_siege);
        let e: Establishment =
            serde_json::from_value(serde_json::json!({ "etablissementSiege": null })).unwrap();
        assert!(!e.etablissement_siege);
    }

    #[test]
    fn response_without_establishments_is_empty() {
        let r: SiretResponse =
            serde_json::from_value(serde_json::json!({ "header": { "statut": 200 } })).unwrap();
        assert!(r.etablissements.is_empty());
    }
}
