//! # End-to-End Mapping Scenarios
//!
//! Loads libraries from disk through `DirectoryLibrary` and drives the
//! engine the way a request handler would: one explicitly loaded
//! `MappingEngine`, queried with audits built from assessment rows.

use std::collections::BTreeMap;
use std::path::Path;

use grcmap_core::{
    summary_counts, AssessmentRow, FrameworkUrn, RequirementResult, RequirementUrn, ScoreRange,
    SourceAudit,
};
use grcmap_mapping::{DirectoryLibrary, EngineConfig, MappingEngine};

fn fw(s: &str) -> FrameworkUrn {
    FrameworkUrn::new(s).unwrap()
}

fn req(s: &str) -> RequirementUrn {
    RequirementUrn::new(s).unwrap()
}

fn row(requirement: &str, result: RequirementResult, score: Option<i64>) -> AssessmentRow {
    AssessmentRow {
        requirement: req(requirement),
        result,
        status: None,
        score,
        is_scored: score.map(|_| true),
        observation: None,
    }
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

fn load(dir: &Path) -> MappingEngine {
    let engine = MappingEngine::new(EngineConfig::default()).unwrap();
    let store = DirectoryLibrary::new(dir);
    let report = engine.load(&store, None).unwrap();
    assert_eq!(report.skipped, 0, "unexpected skips: {:?}", report.skipped_details);
    engine
}

/// Frameworks on a 0..10 scale, published the way library files are:
/// everything nested under `objects`.
const FRAMEWORKS: &str = r#"
urn: urn:lib:frameworks
objects:
  frameworks:
    - urn: urn:fw:a
      min_score: 0
      max_score: 10
    - urn: urn:fw:m
      min_score: 0
      max_score: 10
    - urn: urn:fw:b
      min_score: 0
      max_score: 10
    - urn: urn:fw:z
      min_score: 0
      max_score: 10
"#;

#[test]
fn direct_equal_mapping_same_scale() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "frameworks.yaml", FRAMEWORKS);
    write(
        dir.path(),
        "a-to-b.yaml",
        r#"
objects:
  requirement_mapping_set:
    urn: urn:set:a-b
    source_framework_urn: urn:fw:a
    target_framework_urn: urn:fw:b
    requirement_mappings:
      - source_requirement_urn: req1
        target_requirement_urn: reqA
        relationship: equal
        rationale: syntactic
"#,
    );
    let engine = load(dir.path());

    let audit = SourceAudit::from_assessments(
        ScoreRange::new(0, 10).unwrap(),
        [row("req1", RequirementResult::Compliant, Some(10))],
    );
    let out = engine
        .best_mapping_inferences(&audit, &fw("urn:fw:a"), &fw("urn:fw:b"), None)
        .unwrap();

    let record = out.results.get(&req("reqA")).unwrap();
    assert_eq!(record.result, RequirementResult::Compliant);
    assert_eq!(record.score, Some(10));
    assert_eq!(out.path, vec![fw("urn:fw:a"), fw("urn:fw:b")]);
}

#[test]
fn direct_subset_mapping_is_pessimistic() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "frameworks.yaml", FRAMEWORKS);
    write(
        dir.path(),
        "a-to-b.json",
        r#"{
  "requirement_mapping_sets": [{
    "source_framework_urn": "urn:fw:a",
    "target_framework_urn": "urn:fw:b",
    "requirement_mappings": [
      {"source_requirement_urn": "req1", "target_requirement_urn": "reqA", "relationship": "subset"},
      {"source_requirement_urn": "req2", "target_requirement_urn": "reqB", "relationship": "subset"},
      {"source_requirement_urn": "req3", "target_requirement_urn": "reqC", "relationship": "intersect"}
    ]
  }]
}"#,
    );
    let engine = load(dir.path());

    let audit = SourceAudit::from_assessments(
        ScoreRange::new(0, 10).unwrap(),
        [
            row("req1", RequirementResult::PartiallyCompliant, None),
            row("req2", RequirementResult::NonCompliant, None),
            row("req3", RequirementResult::Compliant, Some(9)),
        ],
    );
    let out = engine
        .best_mapping_inferences(&audit, &fw("urn:fw:a"), &fw("urn:fw:b"), None)
        .unwrap();

    assert_eq!(out.results[&req("reqA")].result, RequirementResult::PartiallyCompliant);
    assert_eq!(out.results[&req("reqB")].result, RequirementResult::NonCompliant);
    assert_eq!(out.results[&req("reqC")].result, RequirementResult::PartiallyCompliant);
    assert_eq!(out.results[&req("reqC")].score, None);
}

#[test]
fn two_hop_path_composes_in_order() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "frameworks.yaml", FRAMEWORKS);
    write(
        dir.path(),
        "chain.yaml",
        r#"
requirement_mapping_sets:
  - source_framework_urn: urn:fw:a
    target_framework_urn: urn:fw:m
    requirement_mappings:
      - {source_requirement_urn: req1, target_requirement_urn: mid1, relationship: intersect}
      - {source_requirement_urn: req2, target_requirement_urn: mid2, relationship: equal}
  - source_framework_urn: urn:fw:m
    target_framework_urn: urn:fw:b
    requirement_mappings:
      - {source_requirement_urn: mid1, target_requirement_urn: reqA, relationship: equal}
      - {source_requirement_urn: mid2, target_requirement_urn: reqB, relationship: superset}
"#,
    );
    let engine = load(dir.path());

    assert_eq!(
        engine.all_paths_between(&fw("urn:fw:a"), &fw("urn:fw:b"), None),
        vec![vec![fw("urn:fw:a"), fw("urn:fw:m"), fw("urn:fw:b")]]
    );

    let audit = SourceAudit::from_assessments(
        ScoreRange::new(0, 10).unwrap(),
        [
            row("req1", RequirementResult::Compliant, Some(8)),
            row("req2", RequirementResult::Compliant, Some(7)),
        ],
    );
    let out = engine
        .best_mapping_inferences(&audit, &fw("urn:fw:a"), &fw("urn:fw:b"), None)
        .unwrap();

    assert!(out.is_complete());
    assert_eq!(out.hops_walked, 2);
    // intersect then equal: downgraded on the first hop, carried as-is on the second.
    assert_eq!(out.results[&req("reqA")].result, RequirementResult::PartiallyCompliant);
    assert_eq!(out.results[&req("reqA")].score, None);
    // equal then superset on matching scales: score survives both hops.
    assert_eq!(out.results[&req("reqB")].result, RequirementResult::Compliant);
    assert_eq!(out.results[&req("reqB")].score, Some(7));
}

#[test]
fn disconnected_framework_has_no_path() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "frameworks.yaml", FRAMEWORKS);
    write(
        dir.path(),
        "a-to-b.yaml",
        r#"
requirement_mapping_set:
  source_framework_urn: urn:fw:a
  target_framework_urn: urn:fw:b
  requirement_mappings:
    - {source_requirement_urn: req1, target_requirement_urn: reqA, relationship: equal}
"#,
    );
    let engine = load(dir.path());

    assert!(engine.all_paths_between(&fw("urn:fw:a"), &fw("urn:fw:z"), None).is_empty());
    let audit = SourceAudit::from_assessments(
        ScoreRange::new(0, 10).unwrap(),
        [row("req1", RequirementResult::Compliant, None)],
    );
    let out = engine
        .best_mapping_inferences(&audit, &fw("urn:fw:a"), &fw("urn:fw:z"), None)
        .unwrap();
    assert!(out.results.is_empty());
    assert!(out.path.is_empty());
}

#[test]
fn unknown_relationship_contributes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "frameworks.yaml", FRAMEWORKS);
    write(
        dir.path(),
        "a-to-b.yaml",
        r#"
requirement_mapping_set:
  source_framework_urn: urn:fw:a
  target_framework_urn: urn:fw:b
  requirement_mappings:
    - {source_requirement_urn: req1, target_requirement_urn: reqA, relationship: similar}
    - {source_requirement_urn: req2, target_requirement_urn: reqB, relationship: Equal}
"#,
    );
    let engine = load(dir.path());

    let audit = SourceAudit::from_assessments(
        ScoreRange::new(0, 10).unwrap(),
        [
            row("req1", RequirementResult::Compliant, None),
            row("req2", RequirementResult::NonCompliant, None),
        ],
    );
    let out = engine
        .best_mapping_inferences(&audit, &fw("urn:fw:a"), &fw("urn:fw:b"), None)
        .unwrap();
    assert!(!out.results.contains_key(&req("reqA")));
    assert_eq!(out.results[&req("reqB")].result, RequirementResult::NonCompliant);

    let mut expected: BTreeMap<RequirementResult, usize> =
        RequirementResult::ALL.iter().map(|r| (*r, 0)).collect();
    expected.insert(RequirementResult::NonCompliant, 1);
    assert_eq!(summary_counts(&out.results), expected);
}

#[test]
fn different_scales_drop_scores() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "frameworks.yaml",
        r#"
frameworks:
  - {urn: urn:fw:a, min_score: 0, max_score: 10}
  - {urn: urn:fw:b, min_score: 1, max_score: 5}
"#,
    );
    write(
        dir.path(),
        "a-to-b.yaml",
        r#"
requirement_mapping_set:
  source_framework_urn: urn:fw:a
  target_framework_urn: urn:fw:b
  requirement_mappings:
    - {source_requirement_urn: req1, target_requirement_urn: reqA, relationship: equal}
"#,
    );
    let engine = load(dir.path());

    let audit = SourceAudit::from_assessments(
        ScoreRange::new(0, 10).unwrap(),
        [AssessmentRow {
            observation: Some("evidence attached".to_string()),
            ..row("req1", RequirementResult::Compliant, Some(10))
        }],
    );
    let out = engine
        .best_mapping_inferences(&audit, &fw("urn:fw:a"), &fw("urn:fw:b"), None)
        .unwrap();
    let record = &out.results[&req("reqA")];
    assert_eq!(record.score, None);
    assert_eq!(record.is_scored, None);
    assert_eq!(record.observation.as_deref(), Some("evidence attached"));
}

#[test]
fn malformed_files_skipped_rest_loaded() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "frameworks.yaml", FRAMEWORKS);
    write(dir.path(), "broken.yaml", "requirement_mapping_set: {source_framework_urn: [");
    write(
        dir.path(),
        "no-source.yaml",
        "requirement_mapping_set:\n  target_framework_urn: urn:fw:b\n",
    );
    write(
        dir.path(),
        "self.yaml",
        "requirement_mapping_set:\n  source_framework_urn: urn:fw:a\n  target_framework_urn: urn:fw:a\n",
    );
    write(
        dir.path(),
        "good.yaml",
        "requirement_mapping_set:\n  source_framework_urn: urn:fw:a\n  target_framework_urn: urn:fw:b\n",
    );
    write(dir.path(), "README.md", "not a library file");

    let engine = MappingEngine::new(EngineConfig::default()).unwrap();
    let store = DirectoryLibrary::new(dir.path());
    let report = engine.load(&store, None).unwrap();

    assert_eq!(report.documents_read, 5);
    assert_eq!(report.skipped, 3);
    assert_eq!(report.mapping_sets_loaded, 1);
    assert_eq!(report.frameworks_indexed, 4);
    assert!(engine.get_mapping_set(&fw("urn:fw:a"), &fw("urn:fw:b")).unwrap().is_some());
    assert!(engine.all_paths_from(&fw("urn:fw:a"), None).all(|p| p.len() == 2));
}

const A_TO_Q: &str = "requirement_mapping_set:
  source_framework_urn: urn:fw:a
  target_framework_urn: urn:fw:q
  requirement_mappings:
    - source_requirement_urn: req1
      target_requirement_urn: reqQ
      relationship: equal
";

#[test]
fn malformed_framework_record_is_counted() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "frameworks.yaml", FRAMEWORKS);
    write(
        dir.path(),
        "extra-frameworks.yaml",
        "frameworks:\n  - urn: urn:fw:q\n    min_score: null\n  - urn: urn:fw:r\n    min_score: 3\n    max_score: 1\n",
    );
    write(dir.path(), "a-to-q.yaml", A_TO_Q);

    let engine = MappingEngine::new(EngineConfig::default()).unwrap();
    let store = DirectoryLibrary::new(dir.path());
    let report = engine.load(&store, None).unwrap();

    assert_eq!(report.skipped, 0);
    assert_eq!(report.frameworks_indexed, 4);
    assert_eq!(report.frameworks_skipped, 2);
    assert_eq!(engine.framework_range(&fw("urn:fw:q")), None);

    // The target's scale is unknown, so the score cannot cross.
    let audit = SourceAudit::from_assessments(
        ScoreRange::new(0, 10).unwrap(),
        [row("req1", RequirementResult::Compliant, Some(7))],
    );
    let out = engine
        .best_mapping_inferences(&audit, &fw("urn:fw:a"), &fw("urn:fw:q"), None)
        .unwrap();
    let record = &out.results[&req("reqQ")];
    assert_eq!(record.result, RequirementResult::Compliant);
    assert_eq!(record.score, None);
}

#[test]
fn reload_from_disk_picks_up_changes() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "frameworks.yaml", FRAMEWORKS);
    write(
        dir.path(),
        "a-to-b.yaml",
        "requirement_mapping_set:\n  source_framework_urn: urn:fw:a\n  target_framework_urn: urn:fw:b\n",
    );
    let engine = load(dir.path());
    assert!(engine.all_paths_between(&fw("urn:fw:a"), &fw("urn:fw:m"), None).is_empty());

    std::fs::remove_file(dir.path().join("a-to-b.yaml")).unwrap();
    write(
        dir.path(),
        "a-to-m.yaml",
        "requirement_mapping_set:\n  source_framework_urn: urn:fw:a\n  target_framework_urn: urn:fw:m\n",
    );
    let store = DirectoryLibrary::new(dir.path());
    let report = engine.reload(&store, None).unwrap();

    assert_eq!((report.added, report.changed, report.removed), (1, 0, 1));
    assert_eq!(
        engine.all_paths_between(&fw("urn:fw:a"), &fw("urn:fw:m"), None),
        vec![vec![fw("urn:fw:a"), fw("urn:fw:m")]]
    );
    assert!(engine.get_mapping_set(&fw("urn:fw:a"), &fw("urn:fw:b")).unwrap().is_none());
}

#[test]
fn cli_loader_matches_engine() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "frameworks.yaml", FRAMEWORKS);
    write(
        dir.path(),
        "a-to-b.yaml",
        "requirement_mapping_set:\n  source_framework_urn: urn:fw:a\n  target_framework_urn: urn:fw:b\n",
    );
    let (engine, report) = grcmap_cli::load_engine(dir.path(), None).unwrap();
    assert_eq!(report.frameworks_indexed, 4);
    assert_eq!(engine.stats().mapping_sets, 1);
    assert_eq!(
        engine.framework_range(&fw("urn:fw:m")),
        Some(ScoreRange::new(0, 10).unwrap())
    );
}
