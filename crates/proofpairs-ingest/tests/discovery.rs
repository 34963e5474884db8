use proofpairs_ingest::{discover_inputs, load_record, DEFAULT_INPUT_PATTERN};
use std::fs;
use tempfile::tempdir;

const RECORD: &str = r#"{
    "file_name": "Nat.thy",
    "problem_names": ["lemma add_0"],
    "translations": [
        ["", "lemma add_0"],
        ["proof (prove) goal (1 subgoal)", "by simp", 1]
    ]
}"#;

#[test]
fn finds_only_one_level_deep_matches_in_order() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("b_project")).unwrap();
    fs::create_dir_all(root.join("a_project/nested")).unwrap();

    fs::write(root.join("b_project/Nat_ground_truth.json"), RECORD).unwrap();
    fs::write(root.join("a_project/List_ground_truth.json"), RECORD).unwrap();
    fs::write(root.join("a_project/List_other.json"), RECORD).unwrap();
    fs::write(root.join("a_project/nested/Deep_ground_truth.json"), RECORD).unwrap();
    fs::write(root.join("Top_ground_truth.json"), RECORD).unwrap();

    let found = discover_inputs(root, DEFAULT_INPUT_PATTERN).unwrap();
    let names: Vec<String> = found
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "a_project/List_ground_truth.json".to_string(),
            "b_project/Nat_ground_truth.json".to_string(),
        ]
    );
}

#[test]
fn missing_root_is_an_error() {
    let dir = tempdir().unwrap();
    let err = discover_inputs(&dir.path().join("nope"), DEFAULT_INPUT_PATTERN).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn load_reports_path_on_malformed_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Broken_ground_truth.json");
    fs::write(&path, r#"{"file_name": "Broken.thy""#).unwrap();

    let err = load_record(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Broken_ground_truth.json"));

    let good = dir.path().join("Nat_ground_truth.json");
    fs::write(&good, RECORD).unwrap();
    let record = load_record(&good).unwrap();
    assert_eq!(record.translations.len(), 2);
}
