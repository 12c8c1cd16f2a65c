// ── Device-local storage collaborators ──
//
// A string key/value store. The persistence layer only ever touches one
// key, but the trait stays general so tests and hosts can share backends.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous key/value storage.
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError>;

    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

// ── File-backed storage ──────────────────────────────────────────────

/// One file per key inside a directory.
///
/// Writes go to a sibling temp file which is then renamed over the
/// target, so a reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Map a key to a file name, replacing characters that are not safe
    /// in paths (`persist:root` → `persist_root.json`).
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

/// Unique sibling temp path for one write, so concurrent writers (in this
/// or another process) never share a temp file.
fn temp_path(path: &Path) -> PathBuf {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    let seq = NEXT.fetch_add(1, Ordering::Relaxed);
    path.with_extension(format!("json.{}.{seq}.tmp", std::process::id()))
}

fn io_error(key: &str, source: io::Error) -> StorageError {
    StorageError::Io {
        key: key.into(),
        source,
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = temp_path(&path);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error(key, e))?;
        tokio::fs::write(&tmp, value.as_bytes())
            .await
            .map_err(|e| io_error(key, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_error(key, e));
        }

        trace!(path = %path.display(), bytes = value.len(), "storage item written");
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

// ── In-memory storage ────────────────────────────────────────────────

/// Process-local storage, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: DashMap<String, String>,
    writes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a write.
    pub fn with_item(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    /// Synchronous read, for assertions.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.items.get(key).map(|v| v.value().clone())
    }

    /// Number of `set_item` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.peek(key))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.items.insert(key.into(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn path_for_sanitizes_key() {
        let storage = FileStorage::new("/data");
        assert_eq!(
            storage.path_for("persist:root"),
            PathBuf::from("/data/persist_root.json")
        );
        assert_eq!(
            storage.path_for("../escape"),
            PathBuf::from("/data/.._escape.json")
        );
    }

    #[tokio::test]
    async fn file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get_item("persist:root").await.unwrap(), None);

        storage
            .set_item("persist:root", "{\"a\":1}".into())
            .await
            .unwrap();
        assert_eq!(
            storage.get_item("persist:root").await.unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert_eq!(files_in(&storage), vec!["persist_root.json".to_owned()]);

        storage.remove_item("persist:root").await.unwrap();
        assert_eq!(storage.get_item("persist:root").await.unwrap(), None);
    }

    fn files_in(storage: &FileStorage) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(storage.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn temp_paths_are_unique_per_write() {
        let target = Path::new("/data/persist_root.json");
        let a = temp_path(target);
        let b = temp_path(target);
        assert_ne!(a, b);
        assert!(a.to_string_lossy().contains(&std::process::id().to_string()));
    }

    #[tokio::test]
    async fn concurrent_writers_do_not_clobber_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = FileStorage::new(dir.path());
        let second = FileStorage::new(dir.path());

        let (a, b) = tokio::join!(
            first.set_item("persist:root", "{\"writer\":1}".into()),
            second.set_item("persist:root", "{\"writer\":2}".into()),
        );
        a.unwrap();
        b.unwrap();

        let stored = first.get_item("persist:root").await.unwrap().unwrap();
        assert!(stored == "{\"writer\":1}" || stored == "{\"writer\":2}");
        assert_eq!(files_in(&first), vec!["persist_root.json".to_owned()]);
    }

    #[tokio::test]
    async fn file_storage_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.remove_item("never-written").await.unwrap();
    }

    #[tokio::test]
    async fn memory_storage_counts_writes() {
        let storage = MemoryStorage::new().with_item("k", "seed");
        assert_eq!(storage.write_count(), 0);

        storage.set_item("k", "v".into()).await.unwrap();
        assert_eq!(storage.peek("k").as_deref(), Some("v"));
        assert_eq!(storage.write_count(), 1);
    }
}
