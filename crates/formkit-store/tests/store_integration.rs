//! Integration tests for the submission store.
//!
//! Covers create/list round-trips, pagination, ordering, update and delete
//! semantics, search, and export through the public store API.

use std::sync::Arc;

use chrono::{TimeDelta, TimeZone, Utc};
use formkit_core::FormError;
use formkit_forms::builtin::onboarding_schema;
use formkit_forms::Record;
use formkit_store::{ExportFormat, ListParams, ManualClock, SortOrder, SubmissionStore};
use serde_json::{json, Value};

fn store() -> SubmissionStore {
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    SubmissionStore::with_clock(
        Arc::new(onboarding_schema()),
        ManualClock::new(start, TimeDelta::milliseconds(1500)),
    )
}

fn record(value: Value) -> Record {
    value.as_object().cloned().unwrap()
}

fn person(name: &str) -> Record {
    record(json!({"name": name, "email": format!("{}@example.com", name.to_lowercase()), "gender": "other"}))
}

fn fill(store: &SubmissionStore, n: usize) {
    for i in 0..n {
        store.submit(person(&format!("Person{i}"))).unwrap();
    }
}

#[test]
fn test_create_then_list_round_trip() {
    let store = store();
    fill(&store, 2);
    let before = store.list(&ListParams::new()).unwrap().total;

    let created = store.submit(person("Newcomer")).unwrap();
    let page = store.list(&ListParams::new()).unwrap();

    assert_eq!(page.total, before + 1);
    let listed = page.data.iter().find(|s| s.id == created.id).unwrap();
    assert_eq!(listed.created_at, created.created_at);
    assert_eq!(listed.data, created.data);
}

#[test]
fn test_second_page_of_fifteen() {
    let store = store();
    fill(&store, 15);
    let page = store.list(&ListParams::new().page(2).limit(10)).unwrap();
    assert_eq!(page.data.len(), 5);
    assert_eq!(page.total, 15);
    assert_eq!(page.total_pages, 2);
}

#[test]
fn test_default_order_is_newest_first() {
    let store = store();
    fill(&store, 5);
    let page = store.list(&ListParams::new()).unwrap();
    let times: Vec<_> = page.data.iter().map(|s| s.created_at).collect();
    assert!(times.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(page.data[0].id, 5);
}

#[test]
fn test_ascending_order() {
    let store = store();
    fill(&store, 3);
    let page = store
        .list(&ListParams::new().sort_order(SortOrder::Asc))
        .unwrap();
    let ids: Vec<_> = page.data.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_invalid_pagination() {
    let store = store();
    for params in [
        ListParams::new().page(0),
        ListParams::new().limit(0),
        ListParams::new().limit(500),
    ] {
        let err = store.list(&params).unwrap_err();
        assert!(matches!(err, FormError::BadRequest(ref m) if m == "Invalid pagination parameters"));
    }
}

#[test]
fn test_update_missing_id() {
    let store = store();
    let err = store.update(9999, person("Ghost")).unwrap_err();
    assert!(matches!(err, FormError::NotFound(ref m) if m == "Submission not found"));
}

#[test]
fn test_invalid_update_leaves_record_unchanged() {
    let store = store();
    let created = store.submit(person("Al")).unwrap();

    let err = store
        .update(created.id, record(json!({"name": "A", "email": "bad", "gender": "male"})))
        .unwrap_err();
    let FormError::Validation(errors) = err else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.get("name"), Some("Minimum length is 2"));
    assert_eq!(errors.get("email"), Some("Invalid format"));

    assert_eq!(store.get(created.id).unwrap(), created);
}

#[test]
fn test_invalid_update_on_missing_id_reports_validation() {
    let store = store();
    let err = store.update(9999, Record::new()).unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_delete_twice() {
    let store = store();
    let created = store.submit(person("Al")).unwrap();
    store.delete(created.id).unwrap();
    let err = store.delete(created.id).unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert!(store.is_empty());
}

#[test]
fn test_search_narrows_total() {
    let store = store();
    fill(&store, 4);
    store
        .submit(record(json!({
            "name": "Zelda",
            "email": "zelda@hyrule.example",
            "gender": "female",
            "interests": ["travel"]
        })))
        .unwrap();

    let page = store.list(&ListParams::new().search("HYRULE")).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.data[0].data["name"], "Zelda");

    let none = store.list(&ListParams::new().search("nobody")).unwrap();
    assert_eq!(none.total, 0);
    assert_eq!(none.total_pages, 0);
}

#[test]
fn test_export_csv_ignores_pagination() {
    let store = store();
    fill(&store, 12);
    let csv = store
        .export(ExportFormat::Csv, &ListParams::new().sort_order(SortOrder::Asc))
        .unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 13);
    assert!(lines[0].starts_with("ID,Created At,name,email"));
    assert!(lines[1].starts_with("1,2024-06-01T09:00:00.000Z,Person0,"));
    assert!(lines[2].starts_with("2,2024-06-01T09:00:01.500Z,Person1,"));
}

#[test]
fn test_export_json_applies_search() {
    let store = store();
    fill(&store, 3);
    let out = store
        .export(ExportFormat::Json, &ListParams::new().search("person1"))
        .unwrap();
    let parsed: Vec<Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0]["id"], 2);
}

#[test]
fn test_concurrent_submissions_get_unique_ids() {
    let store = Arc::new(store());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                (0..25)
                    .map(|i| store.submit(person(&format!("T{t}x{i}"))).unwrap().id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=200).collect::<Vec<_>>());
}
