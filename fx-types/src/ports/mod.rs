//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod catalog;
mod rates;

pub use catalog::CatalogSource;
pub use rates::RateProvider;
