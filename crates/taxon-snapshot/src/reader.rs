//! Snapshot reading operations.
//!
//! The whole document is read into memory and parsed in one step. Snapshots
//! are small (one scheme, a few thousand concepts at most) and are read once
//! per process, so there is no streaming path.

use crate::error::Result;
use crate::model::TaxonomySnapshot;
use std::path::Path;

/// Parse a snapshot from its JSON text.
///
/// # Errors
///
/// Returns [`Error::Json`](crate::Error::Json) if the text is not valid JSON
/// or lacks the `scheme`/`concepts` fields.
///
/// # Examples
///
/// ```
/// use taxon_snapshot::parse_snapshot;
///
/// let snapshot = parse_snapshot(
///     r#"{"scheme":{"id":"S1","name":"Programs","topConceptIds":[]},"concepts":[]}"#,
/// )
/// .unwrap();
/// assert_eq!(snapshot.scheme.id, "S1");
/// assert!(snapshot.is_empty());
/// ```
pub fn parse_snapshot(text: &str) -> Result<TaxonomySnapshot> {
    Ok(serde_json::from_str(text)?)
}

/// Read and parse a snapshot file.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the file cannot be read and
/// [`Error::Json`](crate::Error::Json) if its content is malformed.
///
/// # Examples
///
/// ```no_run
/// use taxon_snapshot::read_snapshot;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let snapshot = read_snapshot("public/taxonomy.json").await?;
/// println!("{} concepts", snapshot.len());
/// # Ok(())
/// # }
/// ```
pub async fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<TaxonomySnapshot> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;
    let snapshot = parse_snapshot(&text)?;

    tracing::debug!(
        path = %path.display(),
        scheme = %snapshot.scheme.id,
        concepts = snapshot.len(),
        "Parsed taxonomy snapshot"
    );

    Ok(snapshot)
}
