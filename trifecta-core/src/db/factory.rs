//! Choosing a section store at startup.
//!
//! Each backend crate exports a [`RepositoryFactory`]; the binary collects
//! them in a [`RepositoryRegistry`] and opens whichever one a
//! [`StoreConfig`] names.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::debug;

use super::repository::{RepositoryError, SectionRepository};

/// Which store to open and how.
///
/// `connection_string` is interpreted by the backend alone. For `memory`
/// it is empty or `:memory:` for an empty store, `seed` for the bundled
/// sections, or a path to a section JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: String,
    pub connection_string: String,
}

impl StoreConfig {
    pub fn new(
        backend: impl Into<String>,
        connection_string: impl Into<String>,
    ) -> Self {
        Self {
            backend: backend.into(),
            connection_string: connection_string.into(),
        }
    }

    /// Empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new("memory", ":memory:")
    }

    /// In-memory store preloaded with the bundled Trifecta sections.
    pub fn seeded() -> Self {
        Self::new("memory", "seed")
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Opens stores for one backend.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Lowercase name matched against [`StoreConfig::backend`].
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        connection_string: &str,
    ) -> Result<Box<dyn SectionRepository>, RepositoryError>;
}

/// Factories keyed by backend name.
#[derive(Default)]
pub struct RepositoryRegistry {
    factories: BTreeMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RepositoryRegistry::register`].
    pub fn with_factory(
        mut self,
        factory: Box<dyn RepositoryFactory>,
    ) -> Self {
        self.register(factory);
        self
    }

    /// Adds `factory`, returning the one it replaced under the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) -> Option<Box<dyn RepositoryFactory>> {
        self.factories.insert(factory.backend_name(), factory)
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens the store described by `config`.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Configuration`] when `config.backend` is not
    /// registered, otherwise whatever the backend's factory returns.
    pub async fn open(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn SectionRepository>, RepositoryError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(RepositoryError::Configuration(format!(
                "unknown backend '{}' (registered: {})",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        debug!(
            backend = %config.backend,
            connection = %config.connection_string,
            "opening section store"
        );
        factory.create(&config.connection_string).await
    }
}
