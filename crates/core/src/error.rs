/// Domain errors. A missing article is not an error: lookups return
/// `Option` and mutations return `bool`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Connectivity or statement failure in the persistence layer. The
    /// message is for logs only and is never sent to clients.
    #[error("Storage error: {0}")]
    Storage(String),
}
