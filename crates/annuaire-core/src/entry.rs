//! Raw registry entries as handed over by a registry client.
//!
//! Upstream records are loosely shaped: any field may be missing, and
//! identifiers sometimes arrive as JSON numbers. [`RawEntry`] keeps every
//! field optional and stringifies scalars at deserialization time; defaults
//! are resolved once, in [`crate::normalize`].

use serde::{Deserialize, Deserializer, Serialize};

/// One establishment-level record from the business registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    #[serde(rename = "nom", default, deserialize_with = "scalar_as_string")]
    pub name: Option<String>,
    #[serde(rename = "adresse", default, deserialize_with = "scalar_as_string")]
    pub address: Option<String>,
    #[serde(rename = "telephone", default, deserialize_with = "scalar_as_string")]
    pub phone: Option<String>,
    #[serde(rename = "secteur", default, deserialize_with = "scalar_as_string")]
    pub sector: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub siret: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub siren: Option<String>,
    #[serde(rename = "dirigeant", default, deserialize_with = "scalar_as_string")]
    pub leader: Option<String>,
    #[serde(rename = "effectif", default, deserialize_with = "scalar_as_string")]
    pub headcount: Option<String>,
    #[serde(rename = "etat", default, deserialize_with = "scalar_as_string")]
    pub status: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|scalar| match scalar {
        Scalar::Text(s) => s,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    }))
}
