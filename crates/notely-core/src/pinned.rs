//! Local pinned-note storage
//!
//! Pinning never reaches the server. The pinned ids live under a single
//! storage key as a JSON array, and the board reads the whole set on every
//! fetch.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::models::NoteId;

/// Storage key holding the pinned ids.
pub const PINNED_NOTES_KEY: &str = "pinnedNotes";

/// Raw storage for the pinned-notes value.
pub trait PinnedStore {
    /// Returns the stored JSON, or `None` when nothing was saved yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored JSON.
    fn write(&self, raw: &str) -> Result<()>;
}

/// Reads the pinned set. Unreadable or malformed content counts as empty.
pub fn load_pinned<S: PinnedStore + ?Sized>(store: &S) -> BTreeSet<NoteId> {
    let raw = match store.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => return BTreeSet::new(),
        Err(error) => {
            tracing::warn!("Failed to read pinned notes: {}", error);
            return BTreeSet::new();
        }
    };

    match serde_json::from_str::<Vec<NoteId>>(&raw) {
        Ok(ids) => ids.into_iter().collect(),
        Err(error) => {
            tracing::warn!("Ignoring malformed pinned notes: {}", error);
            BTreeSet::new()
        }
    }
}

/// Persists the pinned set. Failures are logged, never returned.
pub fn save_pinned<S: PinnedStore + ?Sized>(store: &S, ids: &BTreeSet<NoteId>) {
    let result = serde_json::to_string(&ids.iter().collect::<Vec<_>>())
        .map_err(Error::from)
        .and_then(|raw| store.write(&raw));
    if let Err(error) = result {
        tracing::error!("Error saving pinned notes: {}", error);
    }
}

/// Pinned ids kept in a JSON file.
#[derive(Debug, Clone)]
pub struct FilePinnedStore {
    path: PathBuf,
}

impl FilePinnedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store file inside `dir`, named after the storage key.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{PINNED_NOTES_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PinnedStore for FilePinnedStore {
    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&self, raw: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// Pinned ids kept in memory. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct MemoryPinnedStore {
    value: Arc<Mutex<Option<String>>>,
}

impl MemoryPinnedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with a raw value, malformed or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.value.lock().ok().and_then(|value| value.clone())
    }
}

impl PinnedStore for MemoryPinnedStore {
    fn read(&self) -> Result<Option<String>> {
        self.value
            .lock()
            .map(|value| value.clone())
            .map_err(|_| Error::InvalidInput("pinned store lock poisoned".to_string()))
    }

    fn write(&self, raw: &str) -> Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| Error::InvalidInput("pinned store lock poisoned".to_string()))?;
        *value = Some(raw.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(values: &[i64]) -> BTreeSet<NoteId> {
        values.iter().copied().map(NoteId::new).collect()
    }

    #[test]
    fn empty_store_has_no_pins() {
        assert!(load_pinned(&MemoryPinnedStore::new()).is_empty());
    }

    #[test]
    fn malformed_content_reads_as_empty() {
        for raw in ["not json", "{\"a\":1}", "[\"x\"]", ""] {
            let store = MemoryPinnedStore::with_raw(raw);
            assert!(load_pinned(&store).is_empty(), "raw value {raw:?}");
        }
    }

    #[test]
    fn save_writes_json_array() {
        let store = MemoryPinnedStore::new();
        save_pinned(&store, &ids(&[7, 3]));
        assert_eq!(store.raw().as_deref(), Some("[3,7]"));
        assert_eq!(load_pinned(&store), ids(&[3, 7]));
    }

    #[test]
    fn file_store_round_trips_and_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePinnedStore::in_dir(dir.path().join("nested"));
        assert_eq!(store.read().unwrap(), None);

        save_pinned(&store, &ids(&[1, 2]));
        assert!(store.path().ends_with("pinnedNotes.json"));
        assert_eq!(load_pinned(&store), ids(&[1, 2]));
    }

    #[test]
    fn file_store_with_garbage_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePinnedStore::in_dir(dir.path());
        std::fs::write(store.path(), "[1, 2").unwrap();
        assert!(load_pinned(&store).is_empty());
    }

    #[test]
    fn unreadable_path_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the read fail.
        let store = FilePinnedStore::new(dir.path());
        assert!(store.read().is_err());
        assert!(load_pinned(&store).is_empty());
    }
}
