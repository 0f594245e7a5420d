//! Quotes returned by the rate provider.

use serde::{Deserialize, Serialize};

/// Latest quote for a pair. Ephemeral; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeQuote {
    /// Quoted rate (units of target per unit of base)
    pub bid: f64,
    /// Creation timestamp, in whatever format the provider uses
    pub create_date: String,
}
