use thiserror::Error;

/// Failures surfaced at the report store boundary.
///
/// Aggregation never produces these: malformed numbers inside a report are
/// coerced to zero while reading, only structural problems end up here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persisted blob exists but is not a report collection.
    #[error("persisted reports under '{key}' are malformed: {reason}")]
    MalformedStorage { key: String, reason: String },

    /// There is no report to select as the current one.
    #[error("report collection is empty")]
    EmptyCollection,

    /// The backing store could not be read.
    #[error("failed to read '{key}' from storage")]
    StorageRead {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing store rejected the write.
    #[error("failed to write '{key}' to storage")]
    StorageWrite {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize reports")]
    Serialize(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
