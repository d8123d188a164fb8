//! Loaders for the on-disk inputs of the comparator: bracket schedules
//! (CSV), rate overrides (TOML) and Trifecta section seeds (JSON).

pub mod loader;
pub mod rates;
pub mod sections;

pub use loader::{TaxBracketLoader, TaxBracketLoaderError, TaxBracketRecord};
pub use rates::{RatesFile, RatesFileError, load_rates};
pub use sections::{SectionSeedError, SectionSeedLoader};
