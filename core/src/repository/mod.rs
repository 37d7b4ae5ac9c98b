pub mod file;
pub mod memory;
pub mod report_store;
pub mod traits;

// Re-export
pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;
pub use report_store::{LoadOrigin, ReportStore};
pub use traits::BlobStore;
