use super::*;

fn test_client(base_url: &str) -> SireneClient {
    SireneClient::new(
        Some("test-key"),
        ClientOptions {
            base_url: base_url.to_owned(),
            ..ClientOptions::default()
        },
    )
    .expect("client construction should not fail")
}

#[test]
fn build_url_targets_siret_endpoint() {
    let client = test_client("https://api.insee.fr/api-sirene/3.11");
    let url = client.build_url("siret:12345678900011", 1);
    assert_eq!(
        url.as_str(),
        "https://api.insee.fr/api-sirene/3.11/siret?q=siret%3A12345678900011&nombre=1"
    );
}

#[test]
fn build_url_strips_trailing_slash() {
    let client = test_client("https://api.insee.fr/api-sirene/3.11/");
    let url = client.build_url("x", 10);
    assert!(url.as_str().starts_with("https://api.insee.fr/api-sirene/3.11/siret?"));
}

#[test]
fn build_url_caps_page_size() {
    let client = test_client("https://api.insee.fr/api-sirene/3.11");
    let url = client.build_url("x", 50_000);
    assert!(url.as_str().ends_with("nombre=1000"), "{url}");
}

#[test]
fn build_url_encodes_query_expression() {
    let client = test_client("https://api.insee.fr/api-sirene/3.11");
    let url = client.build_url(&build_sector_query("boulangerie", "75"), 300);
    assert!(
        url.as_str()
            .contains("q=denominationUniteLegale%3Aboulangerie*+AND+codePostalEtablissement%3A75*"),
        "query should be form-encoded: {url}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = SireneClient::new(
        Some("k"),
        ClientOptions {
            base_url: "not a url".to_owned(),
            ..ClientOptions::default()
        },
    );
    assert!(matches!(result, Err(SireneError::InvalidBaseUrl { .. })));
}

#[test]
fn blank_key_selects_demo_mode() {
    let client = SireneClient::new(Some("  "), ClientOptions::default()).unwrap();
    assert!(client.is_demo());
    let client = SireneClient::new(None, ClientOptions::default()).unwrap();
    assert!(client.is_demo());
}

#[test]
fn sector_query_detects_naf_code() {
    assert_eq!(
        build_sector_query("56.10A", "69"),
        "activitePrincipaleUniteLegale:56.10A AND codePostalEtablissement:69*"
    );
    assert_eq!(
        build_sector_query("restauration", "75001"),
        "denominationUniteLegale:restauration* AND codePostalEtablissement:75001*"
    );
}
