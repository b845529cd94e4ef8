use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::repository::{KeyValueStore, StoreError};

/// Backend-agnostic store configuration.
///
/// `backend` must match the [`StoreFactory::backend_name`] of a registered
/// factory. `connection_string` is handed to that factory unchanged.
///
/// | backend  | connection_string examples |
/// |----------|----------------------------|
/// | `memory` | ignored                    |
/// | `sqlite` | `netto.db`, `:memory:`     |
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            connection_string: String::new(),
        }
    }
}

/// One implementation per storage backend, registered with a
/// [`StoreRegistry`] at startup.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Opens the backend and returns a ready store. Implementations may run
    /// migrations here.
    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn KeyValueStore>, StoreError>;
}

/// Registry of [`StoreFactory`] instances, keyed by backend name.
pub struct StoreRegistry {
    factories: HashMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a backend factory, replacing any with the same name.
    pub fn register(&mut self, factory: Box<dyn StoreFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Opens a store through the factory matching `config.backend`.
    ///
    /// # Errors
    /// * [`StoreError::Configuration`] when no factory is registered for
    ///   the requested backend.
    /// * Any error the chosen factory returns.
    pub async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn KeyValueStore>, StoreError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                StoreError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        info!(backend = %config.backend, "opening store");
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

    use super::{KeyValueStore, StoreConfig, StoreError, StoreFactory, StoreRegistry};

    // Never called; the tests only check routing.
    struct StubStore;

    #[async_trait]
    impl KeyValueStore for StubStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            unimplemented!()
        }
        async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            unimplemented!()
        }
        async fn remove(&self, _key: &str) -> Result<(), StoreError> {
            unimplemented!()
        }
    }

    /// Flips `called` when `create` runs.
    struct StubFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl StoreFactory for StubFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }
        async fn create(
            &self,
            _config: &StoreConfig,
        ) -> Result<Box<dyn KeyValueStore>, StoreError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(StubStore))
        }
    }

    struct FailingFactory;

    #[async_trait]
    impl StoreFactory for FailingFactory {
        fn backend_name(&self) -> &'static str {
            "failing"
        }
        async fn create(
            &self,
            _config: &StoreConfig,
        ) -> Result<Box<dyn KeyValueStore>, StoreError> {
            Err(StoreError::Connection("intentional failure".to_string()))
        }
    }

    fn stub_factory(name: &'static str) -> (Box<dyn StoreFactory>, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Box::new(StubFactory {
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

    // =========================================================================
    // StoreConfig tests
    // =========================================================================

    #[test]
    fn store_config_default_is_memory() {
        let cfg = StoreConfig::default();

        assert_eq!(cfg.backend, "memory");
        assert_eq!(cfg.connection_string, "");
    }

    #[test]
    fn store_config_deserializes_with_missing_fields() {
        let cfg: StoreConfig = serde_json::from_str(r#"{"backend":"sqlite"}"#).unwrap();

        assert_eq!(cfg.backend, "sqlite");
        assert_eq!(cfg.connection_string, "");
    }

    // =========================================================================
    // registration tests
    // =========================================================================

    #[test]
    fn new_registry_has_no_backends() {
        assert!(StoreRegistry::new().available_backends().is_empty());
    }

    #[test]
    fn available_backends_is_sorted() {
        let mut reg = StoreRegistry::new();
        let (f1, _) = stub_factory("sqlite");
        let (f2, _) = stub_factory("memory");
        reg.register(f1);
        reg.register(f2);

        assert_eq!(reg.available_backends(), vec!["memory", "sqlite"]);
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut reg = StoreRegistry::new();
        let (old, _) = stub_factory("sqlite");
        let (new, _) = stub_factory("sqlite");
        reg.register(old);
        reg.register(new);

        assert_eq!(reg.available_backends(), vec!["sqlite"]);
    }

    // =========================================================================
    // create tests
    // =========================================================================

    #[tokio::test]
    async fn create_calls_matching_factory_only() {
        let mut reg = StoreRegistry::new();
        let (sqlite, sqlite_called) = stub_factory("sqlite");
        let (memory, memory_called) = stub_factory("memory");
        reg.register(sqlite);
        reg.register(memory);

        assert!(reg.create(&config("sqlite")).await.is_ok());
        assert!(sqlite_called.load(Ordering::SeqCst));
        assert!(!memory_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_backend_names_requested_and_available() {
        let mut reg = StoreRegistry::new();
        let (f, _) = stub_factory("sqlite");
        reg.register(f);

        match reg.create(&config("postgres")).await {
            Err(StoreError::Configuration(msg)) => {
                assert!(msg.contains("postgres"));
                assert!(msg.contains("sqlite"));
            }
            Err(other) => panic!("expected Configuration error, got {other:?}"),
            Ok(_) => panic!("expected Configuration error, got a store"),
        }
    }

    #[tokio::test]
    async fn create_propagates_factory_error() {
        let mut reg = StoreRegistry::new();
        reg.register(Box::new(FailingFactory));

        let result = reg.create(&config("failing")).await;

        assert!(matches!(
            result,
            Err(StoreError::Connection(msg)) if msg == "intentional failure"
        ));
    }
}
