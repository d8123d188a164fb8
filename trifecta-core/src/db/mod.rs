pub mod factory;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryRegistry, StoreConfig};
pub use repository::{RepositoryError, SectionRepository};
