use std::collections::HashSet;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};
use trifecta_core::{NewTrifectaSection, RepositoryError, SectionRepository, TrifectaSection};

#[derive(Debug, Error)]
pub enum SectionSeedError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Duplicate section id {0} in seed data")]
    DuplicateId(i64),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Reads Trifecta sections from the JSON seed format.
///
/// The file is an array of sections keyed the way the dashboard mock data
/// is (`Id`, `subComponents`).
pub struct SectionSeedLoader;

impl SectionSeedLoader {
    pub fn parse(json: &str) -> Result<Vec<TrifectaSection>, SectionSeedError> {
        let sections: Vec<TrifectaSection> = serde_json::from_str(json)?;

        let mut seen = HashSet::with_capacity(sections.len());
        for section in &sections {
            if !seen.insert(section.id) {
                return Err(SectionSeedError::DuplicateId(section.id));
            }
        }

        debug!(count = sections.len(), "parsed section seed data");
        Ok(sections)
    }

    pub fn parse_path(path: &Path) -> Result<Vec<TrifectaSection>, SectionSeedError> {
        let json = fs::read_to_string(path).map_err(|source| SectionSeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&json)
    }

    /// Create every section in `repo`, in file order.
    ///
    /// Seed ids are not carried over; the repository assigns its own. Returns
    /// the stored sections.
    pub async fn load<R>(
        repo: &R,
        sections: Vec<TrifectaSection>,
    ) -> Result<Vec<TrifectaSection>, SectionSeedError>
    where
        R: SectionRepository + ?Sized,
    {
        let mut stored = Vec::with_capacity(sections.len());
        for section in sections {
            let created = repo
                .create_section(NewTrifectaSection::from(section))
                .await?;
            stored.push(created);
        }

        info!(count = stored.len(), "loaded seed sections");
        Ok(stored)
    }
}
