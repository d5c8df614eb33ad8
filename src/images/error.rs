/// Failures at the image store boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing database could not be opened; every caller sees the same outcome.
    #[error("image store unavailable: {0}")]
    Unavailable(String),

    /// A database statement failed (quota, permissions, corruption).
    #[error("image store query failed: {0}")]
    Sql(#[from] rusqlite::Error),

    /// Filesystem failure while materializing a display handle.
    #[error("image store IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking worker running the operation panicked or was cancelled.
    #[error("image store task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    /// The connection lock was poisoned by a panic in another operation.
    #[error("image store connection lock poisoned")]
    Poisoned,
}
