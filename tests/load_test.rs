//! Collection directory loading tests.

mod common;

use std::fs;
use std::path::Path;

use docsift::input::{COLLECTION_INPUT_FILE, RUNS_DIR};
use docsift::{load_collection, load_document, rank_collection_dir, DocumentInput, Error};
use tempfile::TempDir;

const INPUT: &str = r#"{
    "challenge_info": {"challenge_id": "round_1b_002", "test_case_name": "travel_planner"},
    "documents": [
        {"filename": "cities.pdf", "title": "Cities"},
        {"filename": "missing.pdf", "title": "Missing"},
        {"filename": "broken.pdf", "title": "Broken"},
        {"filename": "tax.pdf", "title": "Tax"}
    ],
    "persona": {"role": "Travel Planner"},
    "job_to_be_done": {"task": "Plan a trip of 4 days for a group of 10 college friends."}
}"#;

fn write_collection(dir: &Path) {
    fs::write(dir.join(COLLECTION_INPUT_FILE), INPUT).unwrap();

    let runs = dir.join(RUNS_DIR);
    fs::create_dir_all(&runs).unwrap();

    let mut cities = common::travel_guide();
    cities.id = "South of France - Cities".to_string();
    fs::write(runs.join("cities.json"), serde_json::to_string(&cities).unwrap()).unwrap();
    fs::write(
        runs.join("tax.json"),
        serde_json::to_string(&common::tax_handbook()).unwrap(),
    )
    .unwrap();
    fs::write(runs.join("broken.json"), "{ not json").unwrap();
}

#[test]
fn test_load_collection() {
    let dir = TempDir::new().unwrap();
    write_collection(dir.path());

    let collection = load_collection(dir.path()).unwrap();
    assert_eq!(collection.query.persona(), "Travel Planner");
    assert_eq!(collection.documents.len(), 4);

    let ids: Vec<&str> = collection.documents.iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec!["cities.pdf", "missing.pdf", "broken.pdf", "tax.pdf"]);

    match &collection.documents[0] {
        DocumentInput::Loaded(doc) => {
            assert_eq!(doc.id, "cities.pdf");
            assert!(doc.file_path.ends_with("runs/cities.json"));
        }
        other => panic!("expected a loaded document, got {:?}", other),
    }
}

#[test]
fn test_rank_collection_dir() {
    let dir = TempDir::new().unwrap();
    write_collection(dir.path());

    let result = rank_collection_dir(dir.path()).unwrap();
    assert_eq!(result.input_documents.len(), 4);
    assert_eq!(result.processed_documents, vec!["cities.pdf", "tax.pdf"]);

    let skipped: Vec<(&str, &str)> = result
        .skipped_documents
        .iter()
        .map(|s| (s.document.as_str(), s.reason.code()))
        .collect();
    assert_eq!(
        skipped,
        vec![("missing.pdf", "not_found"), ("broken.pdf", "load_failed")]
    );

    assert_eq!(result.ranked[0].document_id, "cities.pdf");
    assert_eq!(result.ranked[0].section_title, "Budget-Friendly Activities");
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let result = load_collection(dir.path());
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn test_blank_job_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(COLLECTION_INPUT_FILE),
        r#"{"documents": [], "persona": {"role": "Analyst"}, "job_to_be_done": {"task": ""}}"#,
    )
    .unwrap();
    assert!(matches!(
        rank_collection_dir(dir.path()),
        Err(Error::MissingQuery(_))
    ));
}

#[test]
fn test_load_document_sets_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tax.json");
    fs::write(&path, serde_json::to_string(&common::tax_handbook()).unwrap()).unwrap();

    let doc = load_document(&path).unwrap();
    assert_eq!(doc.id, "tax.pdf");
    assert_eq!(doc.file_path, path);
    assert_eq!(doc.runs.len(), 4);
}
