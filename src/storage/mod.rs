//! Layout persistence over a string key-value store.
//!
//! The layout is stored as a JSON array of widgets under a single key.
//! Saving is fire-and-forget: failures are logged and never reach the
//! caller. Loading treats anything it cannot use as absent, so a host
//! always ends up with either the persisted layout or the default seed.

mod file;

pub use file::{FileStore, MemoryStore};

use crate::layout::{default_seed, Widget};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

/// Key the layout is stored under unless configured otherwise.
pub const DEFAULT_LAYOUT_KEY: &str = "dashboard-layout";

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O failed at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The value could not be encoded as JSON.
    #[error("Failed to serialize layout: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Keys become file names and must not contain path separators.
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Minimal string key-value store.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Why a stored layout was rejected.
#[derive(Error, Debug)]
enum RejectReason {
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("duplicate widget id '{0}'")]
    DuplicateId(String),
    #[error("more than one widget of kind '{0}'")]
    DuplicateKind(String),
    #[error("widget '{0}' has a non-finite, negative or empty geometry")]
    BadGeometry(String),
}

fn parse_layout(raw: &str) -> Result<Vec<Widget>, RejectReason> {
    let widgets: Vec<Widget> = serde_json::from_str(raw)?;
    let mut ids = HashSet::new();
    let mut kinds = HashSet::new();
    for widget in &widgets {
        if !ids.insert(widget.id.as_str()) {
            return Err(RejectReason::DuplicateId(widget.id.clone()));
        }
        if !kinds.insert(widget.kind) {
            return Err(RejectReason::DuplicateKind(widget.kind.to_string()));
        }
        let r = widget.rect;
        let finite = [r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite());
        if !finite || r.x < 0.0 || r.y < 0.0 || r.width <= 0.0 || r.height <= 0.0 {
            return Err(RejectReason::BadGeometry(widget.id.clone()));
        }
    }
    Ok(widgets)
}

/// Reads and writes the widget list through a [`KeyValueStore`].
#[derive(Debug)]
pub struct LayoutStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> LayoutStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_LAYOUT_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Persists `widgets`. Errors are logged and dropped.
    pub fn save(&mut self, widgets: &[Widget]) {
        if let Err(e) = self.try_save(widgets) {
            tracing::warn!("failed to save layout under '{}': {e}", self.key);
        }
    }

    /// Like [`save`](Self::save) but surfaces the error, for callers that
    /// want to report it (the CLI does).
    pub fn try_save(&mut self, widgets: &[Widget]) -> Result<(), StorageError> {
        let json = serde_json::to_string(widgets)?;
        self.store.set(&self.key, &json)?;
        tracing::debug!("saved {} widgets under '{}'", widgets.len(), self.key);
        Ok(())
    }

    /// Returns the persisted layout, or `None` if it is absent or unusable.
    pub fn load(&self) -> Option<Vec<Widget>> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("no layout stored under '{}'", self.key);
                return None;
            }
            Err(e) => {
                tracing::warn!("failed to read layout under '{}': {e}", self.key);
                return None;
            }
        };
        match parse_layout(&raw) {
            Ok(widgets) => Some(widgets),
            Err(reason) => {
                tracing::warn!("ignoring stored layout under '{}': {reason}", self.key);
                None
            }
        }
    }

    /// Persisted layout, falling back to the default seed.
    pub fn load_or_seed(&self) -> Vec<Widget> {
        self.load().unwrap_or_else(default_seed)
    }
}
