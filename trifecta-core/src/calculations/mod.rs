//! Tax calculation modules for the business structure comparison.
//!
//! This module provides the progressive and flat-rate tax calculators, the
//! structure comparator built on them, and the advisory helpers that read a
//! finished comparison.

pub mod advisory;
pub mod common;
pub mod comparator;
pub mod federal;
pub mod flat_rate;

pub use advisory::TaxAdvisor;
pub use comparator::{TaxComparator, compare_structures, default_rates};
