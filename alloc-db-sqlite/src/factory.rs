use alloc_core::db::{StoreConfig, StoreFactory};
use alloc_core::{RepositoryError, StateRepository};
use async_trait::async_trait;
use tracing::debug;

use crate::repository::SqliteStateRepository;

/// Maps a connection string to a sqlx SQLite URL.
///
/// * `:memory:` → an in-memory database.
/// * anything starting with `sqlite:` → passed through.
/// * a bare path → that file, created if missing.
fn database_url(connection_string: &str) -> String {
    let trimmed = connection_string.trim();
    if trimmed == ":memory:" {
        "sqlite::memory:".to_string()
    } else if trimmed.starts_with("sqlite:") {
        trimmed.to_string()
    } else {
        format!("sqlite:{trimmed}?mode=rwc")
    }
}

/// [`StoreFactory`] for SQLite.
///
/// ```rust,no_run
/// use alloc_core::db::StoreRegistry;
/// use alloc_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Opens the database and runs migrations.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn StateRepository>, RepositoryError> {
        let url = database_url(&config.connection_string);
        debug!(%url, "opening sqlite store");

        let repo = SqliteStateRepository::new(&url).await?;
        repo.run_migrations().await?;
        Ok(Box::new(repo))
    }
}
