pub mod calculations;
pub mod db;
pub mod models;

pub use calculations::{TaxComparator, compare_structures};
pub use db::repository::{RepositoryError, SectionRepository};
pub use models::*;
