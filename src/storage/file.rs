//! [`KeyValueStore`] backends.

use super::{KeyValueStore, StorageError};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temp file that is synced and then renamed over the
/// target, so a crash mid-write never leaves a truncated layout behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the XDG data directory.
    pub fn default_location() -> Self {
        Self::new(crate::config::xdg::data_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io { path, source: e }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        crate::config::xdg::ensure_dir(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let temp_path = path.with_extension(format!("json.tmp.{}", std::process::id()));
        let result = write_then_rename(&temp_path, &path, value.as_bytes());
        if result.is_err() {
            // The target is untouched; only the temp file needs cleaning up.
            let _ = fs::remove_file(&temp_path);
        }
        result.map_err(|(path, source)| StorageError::Io { path, source })
    }
}

fn write_then_rename(
    temp: &Path,
    target: &Path,
    bytes: &[u8],
) -> Result<(), (PathBuf, std::io::Error)> {
    let at = |path: &Path| {
        let path = path.to_path_buf();
        move |e| (path, e)
    };
    let mut file = fs::File::create(temp).map_err(at(temp))?;
    file.write_all(bytes).map_err(at(temp))?;
    file.sync_all().map_err(at(temp))?;
    drop(file);
    fs::rename(temp, target).map_err(at(target))
}

/// In-process store, mostly for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = FileStore::new(dir.path());
        assert!(store.get("dashboard-layout").expect("get").is_none());
    }

    #[test]
    fn test_file_store_set_creates_dir_and_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let nested = dir.path().join("a/b");
        let mut store = FileStore::new(&nested);
        store.set("dashboard-layout", "[]").expect("set");
        let path = nested.join("dashboard-layout.json");
        assert_eq!(fs::read_to_string(&path).expect("read"), "[]");
        assert_eq!(store.get("dashboard-layout").expect("get").as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_overwrites_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut store = FileStore::new(dir.path());
        store.set("k", "first").expect("set first");
        store.set("k", "second").expect("set second");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("second"));
        let entries: Vec<_> = fs::read_dir(dir.path())
            .expect("read dir")
            .map(|e| e.expect("entry").file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("k.json")]);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut store = FileStore::new(dir.path());
        for key in ["", "..", "a/b", "a\\b"] {
            assert!(
                matches!(store.set(key, "x"), Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_file_store_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let target = dir.path().join("k.json");
        fs::create_dir(&target).expect("create dir");
        fs::write(target.join("keep"), "x").expect("write");

        let mut store = FileStore::new(dir.path());
        let err = store.set("k", "[]").expect_err("rename onto a directory");
        assert!(matches!(err, StorageError::Io { ref path, .. } if path == &target));

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .expect("read dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .filter(|name| name.contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty(), "{leftovers:?}");
        assert!(target.join("keep").exists());
    }

    #[test]
    fn test_file_store_read_error_on_directory() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::create_dir(dir.path().join("k.json")).expect("create dir");
        let store = FileStore::new(dir.path());
        assert!(matches!(store.get("k"), Err(StorageError::Io { .. })));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::default();
        assert!(store.get("k").expect("get").is_none());
        store.set("k", "v").expect("set");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("v"));
    }
}
