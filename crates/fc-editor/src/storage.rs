//! Persistence: key-value stores, autosave, and the saved-document list.
//!
//! The host's storage is modelled as a string key-value store. Two keys
//! are used: `flowchart_autosave` holds the last `{ nodes, connectors }`
//! payload and `flowchart_history` holds every explicitly saved
//! document as a JSON array, oldest first.

use crate::editor::Editor;
use chrono::{DateTime, Utc};
use fc_core::model::{Scene, SceneSnapshot};
use fc_core::{Document, EditorError};
use fc_render::ExportError;
use fc_render::raster::{ExportOptions, render_png};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

pub const AUTOSAVE_KEY: &str = "flowchart_autosave";
pub const HISTORY_KEY: &str = "flowchart_history";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Document(#[from] EditorError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

/// String-valued persistent storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Volatile store, for tests and hosts without persistence.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key)?, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ─── Autosave ────────────────────────────────────────────────────────────

/// Polled timer for periodic autosave.
///
/// The host calls `tick` between events; it fires at most once per
/// interval, so a save can never land in the middle of a mutation.
#[derive(Debug, Clone)]
pub struct AutosaveTimer {
    interval: Duration,
    last: Instant,
}

impl AutosaveTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True when an autosave is due; restarts the interval if so.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) < self.interval {
            return false;
        }
        self.last = now;
        true
    }
}

/// Write the editor's scene to the autosave slot.
pub fn autosave(store: &mut impl KeyValueStore, editor: &Editor) -> Result<(), StoreError> {
    store.set(AUTOSAVE_KEY, &editor.autosave_json()?)?;
    log::debug!("autosaved {} node(s)", editor.scene().nodes().len());
    Ok(())
}

/// Load the autosave slot into the editor. `Ok(false)` when it is empty.
pub fn load_autosave(store: &impl KeyValueStore, editor: &mut Editor) -> Result<bool, StoreError> {
    let Some(json) = store.get(AUTOSAVE_KEY)? else {
        return Ok(false);
    };
    let snapshot = SceneSnapshot::from_json(&json).inspect_err(|e| log::warn!("autosave: {e}"))?;
    editor.load_snapshot(snapshot)?;
    Ok(true)
}

// ─── Saved documents ─────────────────────────────────────────────────────

/// The list of explicitly saved documents, oldest first.
///
/// Indices are positions in that list. Every mutation writes the whole
/// list back to the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedLibrary {
    documents: Vec<Document>,
}

impl SavedLibrary {
    /// Read the list from the store. A missing key is an empty list.
    pub fn load(store: &impl KeyValueStore) -> Result<Self, StoreError> {
        let documents = match store.get(HISTORY_KEY)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };
        Ok(Self { documents })
    }

    fn persist(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        store.set(HISTORY_KEY, &serde_json::to_string(&self.documents)?)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Append the editor's scene as a named document.
    pub fn save(
        &mut self,
        store: &mut impl KeyValueStore,
        editor: &Editor,
        name: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<&Document, StoreError> {
        let name = if name.trim().is_empty() {
            "flowchart"
        } else {
            name
        };
        self.documents.push(editor.document(name, timestamp));
        self.persist(store)?;
        log::info!("saved {name:?} ({} in history)", self.documents.len());
        let last = self.documents.len() - 1;
        Ok(&self.documents[last])
    }

    /// Documents whose name contains `query`, ignoring case, newest first,
    /// each paired with its index.
    pub fn filter(&self, query: &str) -> Vec<(usize, &Document)> {
        self.documents
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, doc)| doc.name_matches(query))
            .collect()
    }

    pub fn get(&self, index: usize) -> Result<&Document, StoreError> {
        self.documents.get(index).ok_or_else(|| {
            EditorError::UnknownSavedDocument {
                index,
                len: self.documents.len(),
            }
            .into()
        })
    }

    /// Replace the editor's scene with a saved document.
    pub fn open(&self, index: usize, editor: &mut Editor) -> Result<(), StoreError> {
        editor.load_document(self.get(index)?)?;
        Ok(())
    }

    pub fn delete(&mut self, store: &mut impl KeyValueStore, index: usize) -> Result<Document, StoreError> {
        self.get(index)?;
        let removed = self.documents.remove(index);
        self.persist(store)?;
        Ok(removed)
    }

    pub fn clear(&mut self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        self.documents.clear();
        self.persist(store)
    }

    /// Render a saved document to PNG without touching any live scene.
    pub fn export_png(&self, index: usize, options: &ExportOptions) -> Result<Vec<u8>, StoreError> {
        let snapshot = self.get(index)?.snapshot().sanitize()?;
        let mut scene = Scene::new();
        scene.load(snapshot);
        Ok(render_png(&scene, options)?)
    }
}
