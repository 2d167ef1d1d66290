use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::*;

#[derive(Debug, thiserror::Error)]
#[error("connexion refusée")]
struct FakeError;

/// In-memory registry that records every call it receives.
struct FakeRegistry {
    response: Result<Vec<RawEntry>, ()>,
    calls: AtomicUsize,
    last_args: Mutex<Option<(String, String, usize)>>,
}

impl FakeRegistry {
    fn returning(entries: Vec<RawEntry>) -> Self {
        Self {
            response: Ok(entries),
            calls: AtomicUsize::new(0),
            last_args: Mutex::new(None),
        }
    }

    fn failing() -> Self {
        Self {
            response: Err(()),
            calls: AtomicUsize::new(0),
            last_args: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RegistryClient for FakeRegistry {
    type Error = FakeError;

    async fn search_by_sector_and_department(
        &self,
        sector: &str,
        department: &str,
        limit: usize,
    ) -> Result<Vec<RawEntry>, FakeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_args.lock().unwrap() =
            Some((sector.to_owned(), department.to_owned(), limit));
        self.response.clone().map_err(|()| FakeError)
    }
}

fn entry(name: &str, status: &str) -> RawEntry {
    RawEntry {
        name: Some(name.to_owned()),
        status: Some(status.to_owned()),
        ..RawEntry::default()
    }
}

#[tokio::test]
async fn blank_inputs_are_rejected_before_calling_client() {
    let client = FakeRegistry::returning(vec![entry("A", "Actif")]);
    for (sector, department) in [
        ("", "75"),
        ("   ", "75"),
        ("restauration", ""),
        ("restauration", " \t"),
        ("", ""),
    ] {
        let err = search(&client, sector, department, DEFAULT_RESULT_CAP)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::EmptyInput), "({sector:?}, {department:?})");
    }
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn inputs_are_trimmed_and_cap_forwarded() {
    let client = FakeRegistry::returning(vec![]);
    search(&client, "  restauration ", " 75 ", 300).await.unwrap();
    let args = client.last_args.lock().unwrap().clone();
    assert_eq!(args, Some(("restauration".to_owned(), "75".to_owned(), 300)));
}

#[tokio::test]
async fn rows_keep_upstream_order() {
    let client = FakeRegistry::returning(vec![
        entry("Zeta", "Actif"),
        entry("Alpha", "Radié"),
        entry("Mu", "Actif"),
    ]);
    let results = search(&client, "restauration", "75", 300).await.unwrap();
    let names: Vec<&str> = results.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Zeta", "Alpha", "Mu"]);
    assert_eq!(results.query.sector, "restauration");
    assert_eq!(results.query.department, "75");
}

#[tokio::test]
async fn cap_is_enforced_even_if_client_over_delivers() {
    let entries = (0..10).map(|i| entry(&format!("E{i}"), "Actif")).collect();
    let client = FakeRegistry::returning(entries);
    let results = search(&client, "btp", "13", 4).await.unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results.rows[3].name, "E3");
}

#[tokio::test]
async fn empty_result_is_not_an_error() {
    let client = FakeRegistry::returning(vec![]);
    let results = search(&client, "restauration", "75", 300).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn client_failure_becomes_upstream_error_with_message() {
    let client = FakeRegistry::failing();
    let err = search(&client, "restauration", "75", 300).await.unwrap_err();
    match err {
        SearchError::Upstream { ref message, .. } => assert_eq!(message, "connexion refusée"),
        SearchError::EmptyInput => panic!("expected Upstream, got EmptyInput"),
    }
    assert!(err.to_string().contains("connexion refusée"));
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn missing_fields_normalize_to_empty() {
    let client = FakeRegistry::returning(vec![RawEntry::default()]);
    let results = search(&client, "restauration", "75", 300).await.unwrap();
    assert_eq!(results.rows, vec![CompanyRow::default()]);
}
