//! Rate provider port.
//!
//! Implemented by the HTTP adapter for the currency-data provider and by
//! in-memory fakes in tests.

use std::sync::Arc;

use crate::domain::{CurrencyPair, ExchangeQuote};
use crate::error::UpstreamError;

/// Port trait for the currency-data provider.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Latest quote for a pair.
    async fn last_quote(&self, pair: &CurrencyPair) -> Result<ExchangeQuote, UpstreamError>;

    /// Daily history between two dates, both already in `YYYYMMDD`.
    /// The payload is returned as the provider sent it.
    async fn daily_range(
        &self,
        pair: &CurrencyPair,
        start_date: &str,
        end_date: &str,
    ) -> Result<serde_json::Value, UpstreamError>;

    /// Daily history for the last `days` days, as the provider sent it.
    async fn daily_last_days(
        &self,
        pair: &CurrencyPair,
        days: i64,
    ) -> Result<serde_json::Value, UpstreamError>;
}

#[async_trait::async_trait]
impl<T: RateProvider + ?Sized> RateProvider for Arc<T> {
    async fn last_quote(&self, pair: &CurrencyPair) -> Result<ExchangeQuote, UpstreamError> {
        (**self).last_quote(pair).await
    }

    async fn daily_range(
        &self,
        pair: &CurrencyPair,
        start_date: &str,
        end_date: &str,
    ) -> Result<serde_json::Value, UpstreamError> {
        (**self).daily_range(pair, start_date, end_date).await
    }

    async fn daily_last_days(
        &self,
        pair: &CurrencyPair,
        days: i64,
    ) -> Result<serde_json::Value, UpstreamError> {
        (**self).daily_last_days(pair, days).await
    }
}
