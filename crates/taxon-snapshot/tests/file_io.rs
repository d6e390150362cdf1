//! Integration tests for snapshot file reading and writing.
//!
//! These tests exercise the on-disk layout produced by the export step and
//! verify that written snapshots are read back unchanged.

use rstest::rstest;
use taxon_snapshot::{
    parse_snapshot, read_snapshot, write_snapshot_atomic, Concept, ConceptScheme, Error,
    TaxonomySnapshot,
};
use tempfile::tempdir;

const EXPORTED: &str = r#"{
  "scheme": {
    "id": "S1",
    "name": "Programs",
    "topConceptIds": ["root"]
  },
  "concepts": [
    { "id": "root", "label": "Academic Programs", "broader": [], "narrower": ["cs"], "related": [] },
    { "id": "cs", "label": "Computer Science", "broader": ["root"], "narrower": [], "related": ["math"] },
    { "id": "math", "label": "Mathematics", "broader": [], "narrower": [], "related": ["cs"] }
  ]
}
"#;

fn sample_snapshot() -> TaxonomySnapshot {
    TaxonomySnapshot::new(
        ConceptScheme::new("S1", "Programs", ["root"]),
        vec![
            Concept::new("root", "Academic Programs").with_narrower(["cs"]),
            Concept::new("cs", "Computer Science")
                .with_broader(["root"])
                .with_related(["math"]),
            Concept::new("math", "Mathematics").with_related(["cs"]),
        ],
    )
}

#[test]
fn parses_exported_layout() {
    let snapshot = parse_snapshot(EXPORTED).unwrap();
    assert_eq!(snapshot, sample_snapshot());
}

#[tokio::test]
async fn reads_exported_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("taxonomy.json");
    tokio::fs::write(&path, EXPORTED).await.unwrap();

    let snapshot = read_snapshot(&path).await.unwrap();

    assert_eq!(snapshot.scheme.name, "Programs");
    assert_eq!(snapshot.len(), 3);
}

#[tokio::test]
async fn written_snapshot_reads_back_unchanged() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("taxonomy.json");
    let original = sample_snapshot();

    write_snapshot_atomic(&path, &original).await.unwrap();
    let read_back = read_snapshot(&path).await.unwrap();

    assert_eq!(original, read_back);
}

#[tokio::test]
async fn write_replaces_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("taxonomy.json");
    tokio::fs::write(&path, "stale").await.unwrap();

    write_snapshot_atomic(&path, &sample_snapshot()).await.unwrap();

    let snapshot = read_snapshot(&path).await.unwrap();
    assert_eq!(snapshot.scheme.id, "S1");
}

#[rstest]
#[case::empty_file("")]
#[case::not_json("scheme: S1")]
#[case::wrong_shape(r#"{"scheme": [], "concepts": []}"#)]
#[case::concepts_not_a_list(r#"{"scheme": {"id": "S1", "name": "P"}, "concepts": {}}"#)]
#[case::link_not_a_string(
    r#"{"scheme": {"id": "S1", "name": "P"}, "concepts": [{"id": "a", "label": "A", "broader": [1]}]}"#
)]
#[tokio::test]
async fn malformed_content_is_json_error(#[case] content: &str) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("taxonomy.json");
    tokio::fs::write(&path, content).await.unwrap();

    let result = read_snapshot(&path).await;

    assert!(matches!(result, Err(Error::Json(_))), "got {result:?}");
}
