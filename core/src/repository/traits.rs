use std::io;

/// Key/value storage for serialized blobs.
pub trait BlobStore {
    /// `Ok(None)` when nothing is stored under `key`.
    fn read(&self, key: &str) -> io::Result<Option<String>>;
    /// Fully replaces whatever is stored under `key`.
    fn write(&self, key: &str, contents: &str) -> io::Result<()>;
}
