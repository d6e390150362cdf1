//! Atomic snapshot writes.
//!
//! The export step writes the snapshot that every later process start reads,
//! so a crash mid-write must never leave a truncated document behind. Data is
//! written to a sibling `.tmp` file, flushed, and renamed over the target.
//! On POSIX systems a rename within one filesystem is atomic.

use crate::error::Result;
use crate::model::TaxonomySnapshot;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Atomically write a snapshot as pretty-printed JSON.
///
/// The document is indented with two spaces and ends with a newline, the
/// same layout the export step has always produced.
///
/// # Errors
///
/// Returns an error if serialization fails, the temporary file cannot be
/// written, or the final rename fails. The target file is left unchanged on
/// failure and a best-effort attempt is made to remove the temporary file.
///
/// # Examples
///
/// ```no_run
/// use taxon_snapshot::{write_snapshot_atomic, ConceptScheme, TaxonomySnapshot};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let snapshot = TaxonomySnapshot::new(ConceptScheme::new("S1", "Programs", ["root"]), vec![]);
/// write_snapshot_atomic("public/taxonomy.json", &snapshot).await?;
/// # Ok(())
/// # }
/// ```
pub async fn write_snapshot_atomic<P: AsRef<Path>>(
    path: P,
    snapshot: &TaxonomySnapshot,
) -> Result<()> {
    let path = path.as_ref();
    let mut body = serde_json::to_vec_pretty(snapshot)?;
    body.push(b'\n');

    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, &body).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    tokio::fs::rename(&temp_path, path).await?;

    tracing::debug!(
        path = %path.display(),
        concepts = snapshot.len(),
        "Wrote taxonomy snapshot"
    );

    Ok(())
}

/// Build the temporary path by appending `.tmp` to the file extension.
fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

async fn write_to_temp_file(temp_path: &Path, body: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).await?;
    file.write_all(body).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}
