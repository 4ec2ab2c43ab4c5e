use async_trait::async_trait;
use thiserror::Error;

use crate::models::StoredState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed stored record: {0}")]
    Malformed(String),
}

/// Storage for the single saved allocation record.
///
/// Implementations hold at most one record, under a fixed storage key.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Returns `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<StoredState>, RepositoryError>;

    /// Replaces the saved record.
    async fn save(
        &self,
        record: &StoredState,
    ) -> Result<(), RepositoryError>;

    /// Removes the saved record. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), RepositoryError>;
}
