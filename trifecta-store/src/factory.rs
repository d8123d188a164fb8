use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;
use trifecta_core::db::RepositoryFactory;
use trifecta_core::{RepositoryError, SectionRepository};
use trifecta_data::{SectionSeedError, SectionSeedLoader};

use crate::repository::MemorySectionRepository;

/// Resolve the seeds directory at runtime so it works both from the build
/// tree and from an installed binary.
///
/// Resolution order:
/// 1. **`TRIFECTA_STORE_SEEDS_DIR`** if set.
/// 2. **`./seeds`** if the directory exists in the current working directory.
/// 3. **`$CARGO_MANIFEST_DIR/seeds`** as a last resort.
fn seeds_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TRIFECTA_STORE_SEEDS_DIR") {
        return PathBuf::from(dir);
    }
    let cwd_seeds = PathBuf::from("./seeds");
    if cwd_seeds.is_dir() {
        return cwd_seeds;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seeds")
}

fn seed_error(err: SectionSeedError) -> RepositoryError {
    match err {
        SectionSeedError::Io { .. } => RepositoryError::Connection(err.to_string()),
        SectionSeedError::Repository(inner) => inner,
        other => RepositoryError::Configuration(other.to_string()),
    }
}

fn load_seed_file(path: &Path) -> Result<MemorySectionRepository, RepositoryError> {
    let sections = SectionSeedLoader::parse_path(path).map_err(seed_error)?;
    info!(path = %path.display(), count = sections.len(), "seeded memory store");
    Ok(MemorySectionRepository::from_sections(sections))
}

/// [`RepositoryFactory`] for the in-memory store.
///
/// ```rust
/// use trifecta_core::db::RepositoryRegistry;
/// use trifecta_store::MemoryRepositoryFactory;
///
/// let registry = RepositoryRegistry::new().with_factory(Box::new(MemoryRepositoryFactory));
/// assert_eq!(registry.available_backends(), vec!["memory"]);
/// ```
pub struct MemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    /// Build a store from `connection_string`:
    /// * `""` or `":memory:"`: empty store.
    /// * `"seed"`: the bundled `sections.json` from the seeds directory.
    /// * anything else: path to a section seed JSON file.
    ///
    /// Seeded stores keep the ids from the file.
    async fn create(
        &self,
        connection_string: &str,
    ) -> Result<Box<dyn SectionRepository>, RepositoryError> {
        let repo = match connection_string.trim() {
            "" | ":memory:" => MemorySectionRepository::new(),
            "seed" => load_seed_file(&seeds_dir().join("sections.json"))?,
            path => load_seed_file(Path::new(path))?,
        };
        Ok(Box::new(repo))
    }
}
