//! JSON file backed key/value store.

use fs2::FileExt;
use league_core::error::StoreError;
use league_core::traits::KeyValueStore;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

type Entries = BTreeMap<String, String>;

/// Store persisted as a single JSON object on disk.
///
/// Every operation re-reads the file so several processes sharing one file see each
/// other's writes. Reads hold a shared lock and read-modify-write cycles an exclusive
/// lock on a sibling `.lock` file, so writers in different processes never lose each
/// other's keys. Mutations go to a uniquely named temp file that is renamed into place.
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut lock_name = path.file_name().map(OsString::from).ok_or_else(|| {
            StoreError::Unavailable(format!("{} is not a file path", path.display()))
        })?;
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);

        debug!("Opened file store at {}", path.display());
        Ok(Self { path, lock_path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    }

    /// Open the lock file. The lock is released when the returned file is dropped.
    fn lock_file(&self) -> Result<File, StoreError> {
        Ok(OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&self.lock_path)?)
    }

    fn load(&self) -> Result<Entries, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Entries::new());
        }
        match serde_json::from_str(&text) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(
                    "Storage file {} is unreadable ({}), starting empty",
                    self.path.display(),
                    e
                );
                Ok(Entries::new())
            }
        }
    }

    fn save(&self, entries: &Entries) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    fn read(&self) -> Result<Entries, StoreError> {
        let lock = self.lock_file()?;
        FileExt::lock_shared(&lock)?;
        self.load()
    }

    fn update<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Entries) -> bool,
    {
        let lock = self.lock_file()?;
        FileExt::lock_exclusive(&lock)?;
        let mut entries = self.load()?;
        if f(&mut entries) {
            self.save(&entries)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read()?.into_keys().collect())
    }

    fn remove_prefixed(&self, prefix: &str) -> Result<usize, StoreError> {
        let mut removed = 0;
        self.update(|entries| {
            let before = entries.len();
            entries.retain(|k, _| !k.starts_with(prefix));
            removed = before - entries.len();
            removed > 0
        })?;
        Ok(removed)
    }

    fn name(&self) -> &str {
        "file"
    }
}
