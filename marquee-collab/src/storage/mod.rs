use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

mod file;
pub use file::*;

mod memory;
pub use memory::*;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the value would exceed the storage quota
    #[error("Storage quota of {quota} bytes exceeded")]
    QuotaExceeded { quota: usize },
    /// A stored value could not be decoded
    #[error("Stored value of {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
    #[error("Could not encode value: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Represents a process-wide key-value store that survives restarts,
/// like the local storage of a browser profile
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Helper trait to reduce boilerplate
pub trait StorageExt: Storage {
    /// Reads and decodes a JSON value. Undecodable values are reported as [StorageError::Corrupt].
    fn get_json<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn set_json<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }
}

impl<S> StorageExt for S where S: Storage + ?Sized {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_helpers() {
        let storage = MemoryStorage::default();

        storage.set_json("numbers", &vec![1, 2, 3]).unwrap();
        storage.set("broken", "{not json").unwrap();

        assert_eq!(storage.get_json::<Vec<u32>>("numbers").unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(storage.get_json::<Vec<u32>>("missing").unwrap(), None);
        assert!(matches!(
            storage.get_json::<Vec<u32>>("broken"),
            Err(StorageError::Corrupt { key, .. }) if key == "broken"
        ));
    }
}
