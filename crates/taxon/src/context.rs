//! Single-initialization holder for the taxonomy store.
//!
//! A process loads its taxonomy once and queries it for the rest of its
//! lifetime. [`TaxonomyContext`] owns that one-time initialization: the first
//! successful load builds the [`TaxonomyStore`], and every later call hands
//! back the same `Arc` without looking at its arguments.
//!
//! The context is an ordinary value. Create one at startup and pass it (or the
//! store it yields) to whatever issues queries; there is no hidden global.
//!
//! # Concurrency
//!
//! Initialization goes through a [`tokio::sync::OnceCell`]. Concurrent first
//! callers are serialized: one of them runs the load while the rest wait, and
//! all observe the same instance. If that load fails, the cell stays empty and
//! the next caller performs a fresh attempt.
//!
//! # Example
//!
//! ```no_run
//! use taxon::context::TaxonomyContext;
//!
//! # async fn example() -> taxon::error::Result<()> {
//! let context = TaxonomyContext::new();
//! let store = context.load_from_file("public/taxonomy.json").await?;
//! println!("{} concepts in {}", store.len(), store.scheme().name);
//!
//! // Later calls return the same instance.
//! let again = context.get()?;
//! assert!(std::sync::Arc::ptr_eq(&store, &again));
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::store::TaxonomyStore;
use std::path::Path;
use std::sync::Arc;
use taxon_snapshot::TaxonomySnapshot;
use tokio::sync::OnceCell;

/// Owner of the process's single [`TaxonomyStore`].
#[derive(Debug, Default)]
pub struct TaxonomyContext {
    store: OnceCell<Arc<TaxonomyStore>>,
}

impl TaxonomyContext {
    /// Create an uninitialized context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: OnceCell::new(),
        }
    }

    /// Initialize from an in-memory snapshot.
    ///
    /// The first call builds the store. Later calls return the existing
    /// instance and drop `snapshot` unused.
    pub async fn initialize(&self, snapshot: TaxonomySnapshot) -> Arc<TaxonomyStore> {
        if let Some(store) = self.store.get() {
            tracing::debug!("Taxonomy store already initialized, ignoring snapshot");
            return Arc::clone(store);
        }

        let store = self
            .store
            .get_or_init(|| async move { Arc::new(TaxonomyStore::new(snapshot)) })
            .await;
        Arc::clone(store)
    }

    /// Initialize from a snapshot file.
    ///
    /// If the context is already initialized the file is not read and the
    /// existing instance is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SnapshotUnavailable`] if the file is missing,
    /// unreadable, or malformed. The context remains uninitialized in that
    /// case so the load can be retried.
    pub async fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Arc<TaxonomyStore>> {
        let path = path.as_ref();

        if let Some(store) = self.store.get() {
            tracing::debug!(path = %path.display(), "Taxonomy store already initialized, skipping load");
            return Ok(Arc::clone(store));
        }

        let store = self
            .store
            .get_or_try_init(|| async {
                match taxon_snapshot::read_snapshot(path).await {
                    Ok(snapshot) => {
                        tracing::info!(
                            path = %path.display(),
                            scheme = %snapshot.scheme.id,
                            concepts = snapshot.len(),
                            "Loaded taxonomy snapshot"
                        );
                        Ok(Arc::new(TaxonomyStore::new(snapshot)))
                    }
                    Err(source) => {
                        tracing::warn!(path = %path.display(), error = %source, "Failed to load taxonomy snapshot");
                        Err(Error::SnapshotUnavailable {
                            path: path.to_path_buf(),
                            source,
                        })
                    }
                }
            })
            .await?;

        Ok(Arc::clone(store))
    }

    /// Get the initialized store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if no load has succeeded yet.
    pub fn get(&self) -> Result<Arc<TaxonomyStore>> {
        self.store.get().cloned().ok_or(Error::NotInitialized)
    }

    /// Whether a store has been initialized.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.store.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxon_snapshot::{Concept, ConceptScheme};
    use tempfile::TempDir;

    fn snapshot(scheme_id: &str) -> TaxonomySnapshot {
        TaxonomySnapshot::new(
            ConceptScheme::new(scheme_id, "Programs", ["root"]),
            vec![Concept::new("root", "Root")],
        )
    }

    #[test]
    fn test_get_before_initialize_fails() {
        let context = TaxonomyContext::new();

        assert!(!context.is_initialized());
        assert!(matches!(context.get(), Err(Error::NotInitialized)));
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let context = TaxonomyContext::new();

        let first = context.initialize(snapshot("S1")).await;
        let second = context.initialize(snapshot("S2")).await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.scheme().id, "S1");
        assert!(Arc::ptr_eq(&first, &context.get().unwrap()));
    }

    #[tokio::test]
    async fn test_load_missing_file_leaves_context_uninitialized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("taxonomy.json");
        let context = TaxonomyContext::new();

        let result = context.load_from_file(&path).await;

        match result {
            Err(Error::SnapshotUnavailable { path: failed, source }) => {
                assert_eq!(failed, path);
                assert!(matches!(source, taxon_snapshot::Error::Io(_)));
            }
            other => panic!("expected SnapshotUnavailable, got {other:?}"),
        }
        assert!(!context.is_initialized());
    }

    #[tokio::test]
    async fn test_load_can_be_retried_after_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("taxonomy.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();
        let context = TaxonomyContext::new();

        let result = context.load_from_file(&path).await;
        assert!(matches!(
            result,
            Err(Error::SnapshotUnavailable {
                source: taxon_snapshot::Error::Json(_),
                ..
            })
        ));

        taxon_snapshot::write_snapshot_atomic(&path, &snapshot("S1"))
            .await
            .unwrap();
        let store = context.load_from_file(&path).await.unwrap();

        assert_eq!(store.scheme().id, "S1");
        assert!(context.is_initialized());
    }

    #[tokio::test]
    async fn test_load_after_initialize_ignores_path() {
        let context = TaxonomyContext::new();
        let first = context.initialize(snapshot("S1")).await;

        let again = context
            .load_from_file("/nonexistent/taxonomy.json")
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&first, &again));
    }
}
