use alloc_core::{RepositoryError, STORAGE_KEY, StateRepository, StoredState};
use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::debug;

/// [`StateRepository`] keeping the serialized record in one `saved_state`
/// row, keyed by storage key.
pub struct SqliteStateRepository {
    pool: SqlitePool,
    storage_key: String,
}

impl SqliteStateRepository {
    /// Connects to `database_url` (a sqlx SQLite URL).
    ///
    /// The pool holds a single connection: there is only ever one writer, and
    /// an in-memory database would otherwise be split across connections.
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self::new_with_pool(pool))
    }

    pub fn new_with_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            storage_key: STORAGE_KEY.to_string(),
        }
    }

    /// Stores the record under `key` instead of [`STORAGE_KEY`].
    pub fn with_storage_key(
        mut self,
        key: impl Into<String>,
    ) -> Self {
        self.storage_key = key.into();
        self
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

#[async_trait]
impl StateRepository for SqliteStateRepository {
    async fn load(&self) -> Result<Option<StoredState>, RepositoryError> {
        let row = sqlx::query("SELECT payload FROM saved_state WHERE storage_key = ?")
            .bind(&self.storage_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let payload: String = row
            .try_get("payload")
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        serde_json::from_str(&payload)
            .map(Some)
            .map_err(|e| RepositoryError::Malformed(e.to_string()))
    }

    async fn save(
        &self,
        record: &StoredState,
    ) -> Result<(), RepositoryError> {
        let payload =
            serde_json::to_string(record).map_err(|e| RepositoryError::Malformed(e.to_string()))?;

        sqlx::query(
            "INSERT INTO saved_state (storage_key, payload, updated_at)
             VALUES (?, ?, datetime('now'))
             ON CONFLICT(storage_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at",
        )
        .bind(&self.storage_key)
        .bind(&payload)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        debug!(key = %self.storage_key, bytes = payload.len(), "saved allocation record");
        Ok(())
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM saved_state WHERE storage_key = ?")
            .bind(&self.storage_key)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc_core::{AllocationKind, AllocationState, HsaCoverageType, IrsLimits};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    async fn setup_test_repo() -> SqliteStateRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let repo = SqliteStateRepository::new_with_pool(pool);
        repo.run_migrations()
            .await
            .expect("Failed to run migrations");
        repo
    }

    async fn insert_raw_payload(
        repo: &SqliteStateRepository,
        payload: &str,
    ) {
        sqlx::query("INSERT INTO saved_state (storage_key, payload) VALUES (?, ?)")
            .bind(repo.storage_key())
            .bind(payload)
            .execute(repo.pool())
            .await
            .expect("Failed to insert raw payload");
    }

    fn sample_record() -> StoredState {
        let limits = IrsLimits::default();
        let mut state = AllocationState::new(dec!(95000), dec!(24));
        state.set_hsa_coverage_type(HsaCoverageType::Family);
        state.set_allocation(AllocationKind::Hsa, dec!(8), &limits);
        state.set_allocation(AllocationKind::Roth401k, dec!(6), &limits);
        StoredState::from(&state)
    }

    #[tokio::test]
    async fn load_returns_none_when_nothing_saved() {
        let repo = setup_test_repo().await;

        assert_eq!(repo.load().await, Ok(None));
    }

    #[tokio::test]
    async fn save_then_load_returns_same_record() {
        let repo = setup_test_repo().await;
        let record = sample_record();

        repo.save(&record).await.expect("save failed");

        assert_eq!(repo.load().await, Ok(Some(record)));
    }

    #[tokio::test]
    async fn save_replaces_previous_record() {
        let repo = setup_test_repo().await;
        repo.save(&sample_record()).await.expect("first save failed");
        let replacement = StoredState::from(&AllocationState::default());

        repo.save(&replacement).await.expect("second save failed");

        assert_eq!(repo.load().await, Ok(Some(replacement)));
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM saved_state")
            .fetch_one(repo.pool())
            .await
            .expect("Failed to count rows");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn load_rejects_payload_that_is_not_json() {
        let repo = setup_test_repo().await;
        insert_raw_payload(&repo, "{not json").await;

        assert!(matches!(repo.load().await, Err(RepositoryError::Malformed(_))));
    }

    #[tokio::test]
    async fn load_rejects_payload_with_wrong_field_type() {
        let repo = setup_test_repo().await;
        insert_raw_payload(&repo, r#"{"hsaCoverageType": "platinum"}"#).await;

        assert!(matches!(repo.load().await, Err(RepositoryError::Malformed(_))));
    }

    #[tokio::test]
    async fn load_accepts_partial_record() {
        let repo = setup_test_repo().await;
        insert_raw_payload(&repo, r#"{"grossAnnualSalary": 52000}"#).await;

        let record = repo.load().await.expect("load failed").expect("no record");

        assert_eq!(record.gross_annual_salary, Some(dec!(52000)));
        assert_eq!(record.effective_tax_rate, None);
        assert!(record.allocations.is_empty());
    }

    #[tokio::test]
    async fn clear_removes_record_and_tolerates_empty_store() {
        let repo = setup_test_repo().await;
        repo.save(&sample_record()).await.expect("save failed");

        repo.clear().await.expect("clear failed");
        repo.clear().await.expect("second clear failed");

        assert_eq!(repo.load().await, Ok(None));
    }

    #[tokio::test]
    async fn storage_keys_do_not_share_records() {
        let repo = setup_test_repo().await;
        repo.save(&sample_record()).await.expect("save failed");

        let other = SqliteStateRepository::new_with_pool(repo.pool().clone())
            .with_storage_key("another-profile");

        assert_eq!(other.load().await, Ok(None));
    }
}
