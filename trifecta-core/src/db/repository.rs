use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewTrifectaSection, SectionUpdate, TrifectaSection};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Section {0} not found")]
    NotFound(i64),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Keyed store of Trifecta sections.
///
/// Ids are assigned by the store and never reused, even after a delete.
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// All sections, ordered by id.
    async fn list_sections(&self) -> Result<Vec<TrifectaSection>, RepositoryError>;

    async fn get_section(&self, id: i64) -> Result<TrifectaSection, RepositoryError>;

    async fn create_section(
        &self,
        section: NewTrifectaSection,
    ) -> Result<TrifectaSection, RepositoryError>;

    /// Applies `update` and returns the stored result.
    async fn update_section(
        &self,
        id: i64,
        update: SectionUpdate,
    ) -> Result<TrifectaSection, RepositoryError>;

    /// Removes the section and returns it as it was.
    async fn delete_section(&self, id: i64) -> Result<TrifectaSection, RepositoryError>;
}
