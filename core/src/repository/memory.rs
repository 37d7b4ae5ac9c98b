use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;

use crate::repository::traits::BlobStore;

/// In-process blob store. Writes can be made to fail to exercise the
/// write-error path.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(key: &str, contents: &str) -> Self {
        let store = Self::new();
        store
            .blobs
            .borrow_mut()
            .insert(key.to_string(), contents.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, contents: &str) -> io::Result<()> {
        if self.fail_writes.get() {
            return Err(io::Error::other("quota exceeded"));
        }
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), contents.to_string());
        Ok(())
    }
}
