//! # FX Types
//!
//! Domain types and port traits for the exchange-rate façade.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Currency codes, pairs, the pair catalog and upstream quotes
//! - `ports/` - Trait definitions that the upstream adapter must implement
//! - `dto/` - Request and response shapes of the HTTP surface
//! - `error/` - Domain, upstream and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{CurrencyCode, CurrencyPair, DateDigits, ExchangeQuote, PairCatalog};
pub use dto::*;
pub use error::{AppError, CatalogError, DomainError, UpstreamError};
pub use ports::{CatalogSource, RateProvider};
