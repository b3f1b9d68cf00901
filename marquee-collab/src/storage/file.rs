use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use log::{info, warn};
use parking_lot::Mutex;

use super::{Result, Storage};

/// Keeps entries in a single JSON file.
/// The file is read once when opened, and rewritten on every change.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens the storage at the given path. A missing file is an empty storage,
    /// and so is a corrupt one.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Storage at {} is corrupt, starting empty: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        info!("Opened storage at {} with {} entries", path.display(), entries.len());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string_pretty(entries)?;

        // Write next to the target first so a failed write never truncates it
        let temporary = self.path.with_extension("tmp");
        fs::write(&temporary, raw)?;
        fs::rename(&temporary, &self.path)?;

        Ok(())
    }

    /// Applies a change and writes it out, restoring the previous value if writing fails
    fn update(&self, key: &str, value: Option<&str>) -> Result<()> {
        let mut entries = self.entries.lock();

        let previous = match value {
            Some(value) => entries.insert(key.to_string(), value.to_string()),
            None => entries.remove(key),
        };

        if let Err(e) = self.persist(&entries) {
            match previous {
                Some(previous) => entries.insert(key.to_string(), previous),
                None => entries.remove(key),
            };

            return Err(e);
        }

        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(key, Some(value))
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.entries.lock().contains_key(key) {
            return Ok(());
        }

        self.update(key, None)
    }
}
