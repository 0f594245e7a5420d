//! Exchange Application Service
//!
//! Turns validated requests into upstream calls and reshapes the results.
//! Contains NO infrastructure logic - the upstreams are injected as ports.

use fx_types::{
    AppError, CatalogSource, ConvertCurrencyRequest, ConvertCurrencyResponse,
    ExchangeHistoryRequest, ExchangeHistoryResponse, ExchangeLastDaysRequest,
    ExchangeLastDaysResponse, ExchangeRateRequest, ExchangeRateResponse, RateProvider,
    ValidCombinationsResponse, Validate,
};

/// Detail for an upstream 404 on quote lookups.
pub const RATE_NOT_FOUND: &str = "Data not found for the specified currencies.";
/// Detail for an upstream 404 on history lookups.
pub const HISTORY_NOT_FOUND: &str = "History not found for the provided currencies.";
/// Detail when the catalog has no pairs.
pub const NO_COMBINATIONS: &str = "No valid combinations found.";

/// Application service for exchange-rate operations.
///
/// Generic over `P: RateProvider` and `C: CatalogSource` - the adapters are
/// injected at compile time, so tests run against in-memory fakes.
pub struct ExchangeService<P: RateProvider, C: CatalogSource> {
    rates: P,
    catalog: C,
}

impl<P: RateProvider, C: CatalogSource> ExchangeService<P, C> {
    /// Creates a new service over the given upstreams.
    pub fn new(rates: P, catalog: C) -> Self {
        Self { rates, catalog }
    }

    /// Returns a reference to the rate provider.
    pub fn rates(&self) -> &P {
        &self.rates
    }

    /// Returns a reference to the catalog source.
    pub fn catalog_source(&self) -> &C {
        &self.catalog
    }

    /// Lists every pair the provider quotes right now.
    ///
    /// Fetches the catalog afresh on each call instead of reusing the copy
    /// loaded at startup, so this listing can differ from what the pair
    /// gate accepts until the process is restarted.
    pub async fn valid_combinations(&self) -> Result<ValidCombinationsResponse, AppError> {
        let catalog = self.catalog.fetch_catalog().await?;

        if catalog.is_empty() {
            return Err(AppError::NotFound(NO_COMBINATIONS.into()));
        }

        Ok(ValidCombinationsResponse {
            valid_combinations: catalog.into_entries(),
        })
    }

    /// Latest rate for a pair.
    pub async fn exchange_rate(
        &self,
        req: ExchangeRateRequest,
    ) -> Result<ExchangeRateResponse, AppError> {
        req.validate()?;

        let quote = self
            .rates
            .last_quote(&req.pair())
            .await
            .map_err(|e| e.into_app_error(RATE_NOT_FOUND))?;

        Ok(ExchangeRateResponse {
            base_currency: req.base_currency,
            target_currency: req.target_currency,
            exchange_rate: quote.bid,
            timestamp: quote.create_date,
        })
    }

    /// History over a date range. Dates arrive as `DDMMYYYY` and are sent
    /// upstream, and echoed back, as `YYYYMMDD`.
    pub async fn exchange_history(
        &self,
        req: ExchangeHistoryRequest,
    ) -> Result<ExchangeHistoryResponse, AppError> {
        req.validate()?;

        let start_date = req.start_date.to_upstream_format()?;
        let end_date = req.end_date.to_upstream_format()?;

        let history = self
            .rates
            .daily_range(&req.pair(), &start_date, &end_date)
            .await
            .map_err(|e| e.into_app_error(HISTORY_NOT_FOUND))?;

        Ok(ExchangeHistoryResponse {
            base_currency: req.base_currency,
            target_currency: req.target_currency,
            start_date,
            end_date,
            history,
        })
    }

    /// History for the last `days` days.
    pub async fn exchange_last_days(
        &self,
        req: ExchangeLastDaysRequest,
    ) -> Result<ExchangeLastDaysResponse, AppError> {
        req.validate()?;

        let history = self
            .rates
            .daily_last_days(&req.pair(), req.days)
            .await
            .map_err(|e| e.into_app_error(HISTORY_NOT_FOUND))?;

        Ok(ExchangeLastDaysResponse {
            base_currency: req.base_currency,
            target_currency: req.target_currency,
            days: req.days,
            history,
        })
    }

    /// Converts `amount` of the base currency at the latest bid.
    pub async fn convert_currency(
        &self,
        req: ConvertCurrencyRequest,
    ) -> Result<ConvertCurrencyResponse, AppError> {
        req.validate()?;

        let quote = self
            .rates
            .last_quote(&req.pair())
            .await
            .map_err(|e| e.into_app_error(RATE_NOT_FOUND))?;

        Ok(ConvertCurrencyResponse {
            base_currency: req.base_currency,
            target_currency: req.target_currency,
            amount: req.amount,
            exchange_rate: quote.bid,
            converted_amount: req.amount * quote.bid,
        })
    }
}
