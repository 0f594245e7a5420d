//! Domain types for the exchange-rate façade.

pub mod catalog;
pub mod currency;
pub mod date;
pub mod quote;

pub use catalog::PairCatalog;
pub use currency::{CurrencyCode, CurrencyPair, pair_key};
pub use date::DateDigits;
pub use quote::ExchangeQuote;
