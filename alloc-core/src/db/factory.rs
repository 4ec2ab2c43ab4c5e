use std::collections::HashMap;

use async_trait::async_trait;

use super::repository::{RepositoryError, StateRepository};

/// Backend-agnostic storage configuration.
///
/// `backend` must match the [`StoreFactory::backend_name`] of a registered
/// factory. `connection_string` is handed to that factory untouched.
///
/// | backend    | connection_string examples                 |
/// |------------|--------------------------------------------|
/// | `sqlite`   | `allocations.db`, `:memory:`, `sqlite:...` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        }
    }
}

/// One implementation per storage backend, registered with a
/// [`StoreRegistry`] at startup.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Open (or create) the store and return it ready for use.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn StateRepository>, RepositoryError>;
}

/// Storage factories keyed by backend name.
pub struct StoreRegistry {
    factories: HashMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a factory, replacing any earlier one with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn StoreFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names, sorted.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Opens the store described by `config`.
    ///
    /// # Errors
    /// * [`RepositoryError::Configuration`] when no factory matches
    ///   `config.backend`.
    /// * Whatever the matching factory returns.
    pub async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn StateRepository>, RepositoryError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                RepositoryError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use crate::models::StoredState;

    use super::{RepositoryError, StateRepository, StoreConfig, StoreFactory, StoreRegistry};

    // Never read or written; the registry tests only check routing.
    struct NullRepository;

    #[async_trait]
    impl StateRepository for NullRepository {
        async fn load(&self) -> Result<Option<StoredState>, RepositoryError> {
            Ok(None)
        }
        async fn save(
            &self,
            _record: &StoredState,
        ) -> Result<(), RepositoryError> {
            Ok(())
        }
        async fn clear(&self) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    /// Flips `called` when `create` runs.
    struct FlagFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl StoreFactory for FlagFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }
        async fn create(
            &self,
            _config: &StoreConfig,
        ) -> Result<Box<dyn StateRepository>, RepositoryError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(NullRepository))
        }
    }

    struct UnreachableFactory;

    #[async_trait]
    impl StoreFactory for UnreachableFactory {
        fn backend_name(&self) -> &'static str {
            "unreachable"
        }
        async fn create(
            &self,
            _config: &StoreConfig,
        ) -> Result<Box<dyn StateRepository>, RepositoryError> {
            Err(RepositoryError::Connection("disk unavailable".to_string()))
        }
    }

    fn flag_factory(name: &'static str) -> (Box<dyn StoreFactory>, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Box::new(FlagFactory {
                name,
                called: flag.clone(),
            }),
            flag,
        )
    }

    fn config(backend: &str) -> StoreConfig {
        StoreConfig {
            backend: backend.to_string(),
            connection_string: ":memory:".to_string(),
        }
    }

    #[test]
    fn store_config_default_is_sqlite_memory() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.backend, "sqlite");
        assert_eq!(cfg.connection_string, ":memory:");
    }

    #[test]
    fn new_registry_has_no_backends() {
        assert!(StoreRegistry::default().available_backends().is_empty());
    }

    #[test]
    fn available_backends_is_sorted() {
        let mut reg = StoreRegistry::new();
        let (f1, _) = flag_factory("sqlite");
        let (f2, _) = flag_factory("file");
        reg.register(f1);
        reg.register(f2);
        assert_eq!(reg.available_backends(), vec!["file", "sqlite"]);
    }

    #[test]
    fn registering_same_name_twice_keeps_one_entry() {
        let mut reg = StoreRegistry::new();
        let (old, _) = flag_factory("sqlite");
        let (new, _) = flag_factory("sqlite");
        reg.register(old);
        reg.register(new);
        assert_eq!(reg.available_backends(), vec!["sqlite"]);
    }

    #[tokio::test]
    async fn create_routes_to_matching_factory_only() {
        let mut reg = StoreRegistry::new();
        let (sqlite, sqlite_called) = flag_factory("sqlite");
        let (file, file_called) = flag_factory("file");
        reg.register(sqlite);
        reg.register(file);

        let result = reg.create(&config("sqlite")).await;

        assert!(result.is_ok(), "expected Ok, got {:#?}", result.err());
        assert!(sqlite_called.load(Ordering::SeqCst));
        assert!(!file_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_backend_error_names_requested_and_available() {
        let mut reg = StoreRegistry::new();
        let (f, _) = flag_factory("sqlite");
        reg.register(f);

        match reg.create(&config("postgres")).await {
            Err(RepositoryError::Configuration(msg)) => {
                assert!(msg.contains("postgres"));
                assert!(msg.contains("sqlite"));
            }
            Err(other) => panic!("expected Configuration error, got {other:#?}"),
            Ok(_) => panic!("expected Configuration error, got a repository"),
        }
    }

    #[tokio::test]
    async fn create_propagates_factory_error() {
        let mut reg = StoreRegistry::new();
        reg.register(Box::new(UnreachableFactory));

        let result = reg.create(&config("unreachable")).await;

        assert_eq!(
            result.err(),
            Some(RepositoryError::Connection("disk unavailable".to_string()))
        );
    }
}
