use crossbeam::atomic::AtomicCell;

use crate::{MemoryStorage, Storage, StorageError};

/// A memory storage whose reads can be made to fail, like a backend that went away
#[derive(Debug, Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    failing_reads: AtomicCell<bool>,
}

impl FlakyStorage {
    pub fn fail_reads(&self, failing: bool) {
        self.failing_reads.store(failing);
    }
}

impl Storage for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failing_reads.load() {
            return Err(std::io::Error::other("backend unavailable").into());
        }

        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}
