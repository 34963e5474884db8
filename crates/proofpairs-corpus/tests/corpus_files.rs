use proofpairs_core::{ProofLogRecord, Strategy, Transition};
use proofpairs_corpus::{
    output_dir_for, prepare_output_dir, CorpusConfig, CorpusWriter, DirectorySink, MANIFEST_FILE,
};
use std::fs;
use std::path::Path;

fn records() -> Vec<ProofLogRecord> {
    vec![
        ProofLogRecord {
            file_name: "Nat.thy".to_string(),
            problem_names: ["lemma foo", "P"].iter().map(|s| s.to_string()).collect(),
            translations: vec![
                Transition::new("", "theory Nat imports Main begin"),
                Transition::with_depth("", "lemma foo", 0),
                Transition::with_depth("proof (prove) goal (1 subgoal)", "proof (induct n)", 1),
                Transition::with_depth("proof (state)", "case 0", 2),
                Transition::with_depth("proof (prove)", "then show ?case by simp", 2),
                Transition::with_depth("proof (state)", "qed", 1),
                Transition::with_depth("", "P", 0),
                Transition::with_depth("proof (prove)\n  goal", "by auto", 1),
            ],
        },
        ProofLogRecord {
            file_name: "List.thy".to_string(),
            problem_names: ["theorem bar"].iter().map(|s| s.to_string()).collect(),
            translations: vec![
                Transition::with_depth("", "theorem bar", 0),
                Transition::with_depth("proof (prove)", "by blast", 1),
            ],
        },
    ]
}

fn run(dir: &Path, strategy: Strategy) {
    prepare_output_dir(dir, false).unwrap();
    let mut writer = CorpusWriter::new(CorpusConfig::new(strategy), DirectorySink::new(dir)).unwrap();
    for record in records() {
        writer.process_record(&record).unwrap();
    }
    writer.finish().unwrap();
}

fn snapshot(dir: &Path) -> Vec<(String, String)> {
    let mut files: Vec<(String, String)> = fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let path = e.unwrap().path();
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            (name, fs::read_to_string(&path).unwrap())
        })
        .collect();
    files.sort();
    files
}

#[test]
fn writes_aligned_split_files_and_manifest() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = output_dir_for(&tmp.path().join("pairs"), Strategy::Needed);
    run(&dir, Strategy::Needed);

    for split in ["train", "val", "test"] {
        let src = fs::read_to_string(dir.join(format!("{split}.src"))).unwrap();
        let tgt = fs::read_to_string(dir.join(format!("{split}.tgt"))).unwrap();
        assert_eq!(src.lines().count(), tgt.lines().count(), "{split}");
    }

    // "lemma foo" and "theorem bar" are train, "P" is test.
    let train_src = fs::read_to_string(dir.join("train.src")).unwrap();
    let train_tgt = fs::read_to_string(dir.join("train.tgt")).unwrap();
    assert_eq!(
        train_tgt,
        "proof (induct n)\ncase 0\nthen show ?case by simp\nqed\nby blast\n"
    );
    let lines: Vec<&str> = train_src.lines().collect();
    assert_eq!(
        lines[3],
        "<ISA_NDS> lemma foo \\n proof (induct n) <ISA_OBS> proof (state)"
    );

    let test_src = fs::read_to_string(dir.join("test.src")).unwrap();
    assert_eq!(test_src, "<ISA_NDS> P <ISA_OBS> proof (prove) goal\n");

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join(MANIFEST_FILE)).unwrap()).unwrap();
    assert_eq!(
        manifest["train"],
        serde_json::json!([["Nat.thy", "lemma foo"], ["List.thy", "theorem bar"]])
    );
    assert_eq!(manifest["test"], serde_json::json!([["Nat.thy", "P"]]));
    assert_eq!(manifest["val"], serde_json::json!([]));
}

#[test]
fn reruns_are_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("out_with_trimmed_proof_and_state");

    run(&dir, Strategy::TrimmedProofAndState);
    let first = snapshot(&dir);
    run(&dir, Strategy::TrimmedProofAndState);
    assert_eq!(snapshot(&dir), first);
    assert_eq!(first.len(), 7);
}
