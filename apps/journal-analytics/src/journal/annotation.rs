//! Per-trade annotations (free-text note plus tags), keyed by trade id.
//!
//! The analytics never read annotations; they are a side store the journal
//! cross-references against a filtered trade set.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::trade::Trade;

/// A user note attached to a trade.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotation {
    /// Free-text note.
    #[serde(default)]
    pub note: String,
    /// Tags such as `"fomo"` or `"plan"`.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Annotation {
    /// Create an annotation with a note and no tags.
    #[must_use]
    pub fn note(note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            tags: Vec::new(),
        }
    }
}

/// Annotation persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("Annotation store I/O failed for '{path}': {source}")]
    Io {
        /// Path of the backing file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The backing file does not hold a JSON annotation map.
    #[error("Annotation store '{path}' is not valid JSON: {source}")]
    Json {
        /// Path of the backing file.
        path: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Key-value store for annotations.
pub trait AnnotationStore: Send + Sync {
    /// Annotation for a trade, if any.
    fn get(&self, trade_id: &str) -> Result<Option<Annotation>, StoreError>;

    /// Insert or replace the annotation for a trade.
    fn set(&self, trade_id: &str, annotation: Annotation) -> Result<(), StoreError>;

    /// Remove and return the annotation for a trade.
    fn remove(&self, trade_id: &str) -> Result<Option<Annotation>, StoreError>;

    /// Every annotation, ordered by trade id.
    fn all(&self) -> Result<BTreeMap<String, Annotation>, StoreError>;
}

/// Ids of the trades in `trades` that carry an annotation, in input order.
///
/// # Errors
///
/// Propagates the store's read error.
pub fn annotated_ids(
    trades: &[Trade],
    store: &dyn AnnotationStore,
) -> Result<Vec<String>, StoreError> {
    let entries = store.all()?;
    Ok(trades
        .iter()
        .filter(|t| entries.contains_key(&t.id))
        .map(|t| t.id.clone())
        .collect())
}

/// In-memory implementation, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryAnnotationStore {
    entries: RwLock<BTreeMap<String, Annotation>>,
}

impl InMemoryAnnotationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnnotationStore for InMemoryAnnotationStore {
    fn get(&self, trade_id: &str) -> Result<Option<Annotation>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(trade_id).cloned())
    }

    fn set(&self, trade_id: &str, annotation: Annotation) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(trade_id.to_string(), annotation);
        drop(entries);
        Ok(())
    }

    fn remove(&self, trade_id: &str) -> Result<Option<Annotation>, StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.remove(trade_id))
    }

    fn all(&self) -> Result<BTreeMap<String, Annotation>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.clone())
    }
}

/// File-backed implementation persisting a JSON object `{trade_id: annotation}`.
///
/// The file is read once on open and rewritten on every mutation.
#[derive(Debug)]
pub struct JsonFileAnnotationStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, Annotation>>,
}

impl JsonFileAnnotationStore {
    /// Open a store, loading existing annotations if the file exists.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str(&contents).map_err(|source| StoreError::Json {
                path: path.display().to_string(),
                source,
            })?
        } else {
            BTreeMap::new()
        };

        tracing::debug!(
            path = %path.display(),
            annotations = entries.len(),
            "Opened annotation store"
        );

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, Annotation>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Json {
            path: self.path.display().to_string(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

impl AnnotationStore for JsonFileAnnotationStore {
    fn get(&self, trade_id: &str) -> Result<Option<Annotation>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(trade_id).cloned())
    }

    fn set(&self, trade_id: &str, annotation: Annotation) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(trade_id.to_string(), annotation);
        self.persist(&entries)
    }

    fn remove(&self, trade_id: &str) -> Result<Option<Annotation>, StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let removed = entries.remove(trade_id);
        if removed.is_some() {
            self.persist(&entries)?;
        }
        Ok(removed)
    }

    fn all(&self) -> Result<BTreeMap<String, Annotation>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trade::test_support::trade;

    fn exercise(store: &dyn AnnotationStore) {
        assert_eq!(store.get("t1").ok().flatten(), None);

        let annotation = Annotation {
            note: "chased the breakout".to_string(),
            tags: vec!["fomo".to_string()],
        };
        assert!(store.set("t1", annotation.clone()).is_ok());
        assert!(store.set("t2", Annotation::note("clean setup")).is_ok());
        assert_eq!(store.get("t1").ok().flatten(), Some(annotation));

        let Ok(removed) = store.remove("t2") else {
            panic!("remove should succeed");
        };
        assert_eq!(removed, Some(Annotation::note("clean setup")));

        let Ok(all) = store.all() else {
            panic!("all should succeed");
        };
        assert_eq!(all.keys().collect::<Vec<_>>(), ["t1"]);
    }

    #[test]
    fn test_in_memory_store() {
        exercise(&InMemoryAnnotationStore::new());
    }

    #[test]
    fn test_json_file_store_persists() {
        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("temp dir: {e}"),
        };
        let path = dir.path().join("annotations.json");

        let store = match JsonFileAnnotationStore::open(&path) {
            Ok(s) => s,
            Err(e) => panic!("open new store: {e}"),
        };
        exercise(&store);
        drop(store);

        let reopened = match JsonFileAnnotationStore::open(&path) {
            Ok(s) => s,
            Err(e) => panic!("reopen store: {e}"),
        };
        let Ok(Some(annotation)) = reopened.get("t1") else {
            panic!("annotation should survive reopen");
        };
        assert_eq!(annotation.tags, ["fomo"]);
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_json_file_store_rejects_garbage() {
        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("temp dir: {e}"),
        };
        let path = dir.path().join("annotations.json");
        if let Err(e) = std::fs::write(&path, "not json") {
            panic!("write: {e}");
        }
        assert!(matches!(
            JsonFileAnnotationStore::open(&path),
            Err(StoreError::Json { .. })
        ));
    }

    #[test]
    fn test_annotated_ids_follow_trade_order() {
        let store = InMemoryAnnotationStore::new();
        for id in ["c", "a", "zz"] {
            assert!(store.set(id, Annotation::default()).is_ok());
        }
        let trades = vec![
            trade("a", "SOL", 1, 1),
            trade("b", "SOL", 1, 2),
            trade("c", "SOL", 1, 3),
        ];

        let Ok(ids) = annotated_ids(&trades, &store) else {
            panic!("annotated_ids should succeed");
        };
        assert_eq!(ids, ["a", "c"]);
    }
}
