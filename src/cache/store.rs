// Key-value stores backing the cache.
// Opaque string keys, UTF-8 text values; file-backed or in-memory.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::error::{FolioError, Result};

use super::paths::key_path;

/// Minimal persistence capability the cache depends on.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn delete(&mut self, key: &str) -> Result<()>;
}

fn check_quota(quota: Option<usize>, key: &str, value: &str) -> Result<()> {
    match quota {
        Some(limit) if value.len() > limit => Err(FolioError::Store(format!(
            "quota exceeded writing {} ({} > {} bytes)",
            key,
            value.len(),
            limit
        ))),
        _ => Ok(()),
    }
}

/// One JSON file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    quota: Option<usize>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            quota: None,
        }
    }

    /// Reject values larger than `bytes`.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(key_path(&self.root, key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_quota(self.quota, key, value)?;
        fs::create_dir_all(&self.root)?;

        let path = key_path(&self.root, key);

        // Write atomically via temp file
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(key_path(&self.root, key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store; contents vanish with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }
}

#[cfg(test)]
impl MemoryStore {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_quota(self.quota, key, value)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_set_get_delete() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("cache"));

        assert_eq!(store.get("projects").unwrap(), None);

        store.set("projects", "{\"data\":[]}").unwrap();
        assert_eq!(
            store.get("projects").unwrap(),
            Some("{\"data\":[]}".to_string())
        );

        store.delete("projects").unwrap();
        assert_eq!(store.get("projects").unwrap(), None);
    }

    #[test]
    fn test_file_store_overwrite_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set("theme", "dark").unwrap();
        store.set("theme", "light").unwrap();

        assert_eq!(store.get("theme").unwrap(), Some("light".to_string()));
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_similar_keys_do_not_share_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set("a.b", "dot").unwrap();
        store.set("a/b", "slash").unwrap();
        store.set("a_b", "underscore").unwrap();

        assert_eq!(store.get("a.b").unwrap(), Some("dot".to_string()));
        assert_eq!(store.get("a/b").unwrap(), Some("slash".to_string()));
        assert_eq!(store.get("a_b").unwrap(), Some("underscore".to_string()));
    }

    #[test]
    fn test_delete_missing_key_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());
        assert!(store.delete("nothing").is_ok());
    }

    #[test]
    fn test_quota_rejects_large_values() {
        let temp_dir = TempDir::new().unwrap();
        let mut file_store = FileStore::new(temp_dir.path()).with_quota(4);
        assert!(matches!(
            file_store.set("k", "too long"),
            Err(FolioError::Store(_))
        ));
        assert_eq!(file_store.get("k").unwrap(), None);

        let mut memory_store = MemoryStore::new().with_quota(4);
        assert!(memory_store.set("k", "tiny").is_ok());
        assert!(memory_store.set("k", "too long").is_err());
        assert_eq!(memory_store.get("k").unwrap(), Some("tiny".to_string()));
    }
}
