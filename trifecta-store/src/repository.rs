use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;
use trifecta_core::{
    NewTrifectaSection, RepositoryError, SectionRepository, SectionUpdate, TrifectaSection,
};

#[derive(Debug, Default)]
struct StoreState {
    sections: BTreeMap<i64, TrifectaSection>,
    next_id: i64,
}

/// Process-local section store.
///
/// Sections live in an id-ordered map behind a `RwLock`, so concurrent readers
/// never block each other. Ids start at 1 and are never reissued, even after
/// the section holding one is deleted.
#[derive(Debug)]
pub struct MemorySectionRepository {
    state: RwLock<StoreState>,
}

impl MemorySectionRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                sections: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Store that starts with `sections`, keeping their ids.
    ///
    /// New sections get ids above the highest preloaded one. A later section
    /// with the same id as an earlier one replaces it.
    pub fn from_sections(sections: Vec<TrifectaSection>) -> Self {
        let next_id = sections.iter().map(|s| s.id).max().unwrap_or(0).max(0) + 1;
        let sections = sections.into_iter().map(|s| (s.id, s)).collect();

        Self {
            state: RwLock::new(StoreState { sections, next_id }),
        }
    }
}

impl Default for MemorySectionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SectionRepository for MemorySectionRepository {
    async fn list_sections(&self) -> Result<Vec<TrifectaSection>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.sections.values().cloned().collect())
    }

    async fn get_section(&self, id: i64) -> Result<TrifectaSection, RepositoryError> {
        let state = self.state.read().await;
        state
            .sections
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn create_section(
        &self,
        section: NewTrifectaSection,
    ) -> Result<TrifectaSection, RepositoryError> {
        let mut state = self.state.write().await;

        let id = state.next_id;
        state.next_id += 1;

        let created = TrifectaSection::from_new(id, section);
        state.sections.insert(id, created.clone());

        info!(id, name = %created.name, "created section");
        Ok(created)
    }

    async fn update_section(
        &self,
        id: i64,
        update: SectionUpdate,
    ) -> Result<TrifectaSection, RepositoryError> {
        let mut state = self.state.write().await;
        let section = state
            .sections
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;

        section.apply(update);

        info!(id, "updated section");
        Ok(section.clone())
    }

    async fn delete_section(&self, id: i64) -> Result<TrifectaSection, RepositoryError> {
        let mut state = self.state.write().await;
        let removed = state
            .sections
            .remove(&id)
            .ok_or(RepositoryError::NotFound(id))?;

        info!(id, "deleted section");
        Ok(removed)
    }
}
