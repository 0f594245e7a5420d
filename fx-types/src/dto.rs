//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Request types are read from the query string. Field formats that can be
//! expressed as types (`CurrencyCode`, `DateDigits`) are enforced during
//! deserialization; numeric bounds are enforced by [`Validate`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CurrencyCode, CurrencyPair, DateDigits};
use crate::error::DomainError;

/// Checks that cannot be expressed in a field's type.
pub trait Validate {
    fn validate(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query for the latest rate of a pair.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExchangeRateRequest {
    /// Base currency code (e.g., USD)
    #[param(value_type = String, pattern = "^[A-Z]{3}$", example = "USD")]
    pub base_currency: CurrencyCode,
    /// Target currency code (e.g., BRL)
    #[param(value_type = String, pattern = "^[A-Z]{3}$", example = "BRL")]
    pub target_currency: CurrencyCode,
}

impl ExchangeRateRequest {
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.base_currency.clone(), self.target_currency.clone())
    }
}

impl Validate for ExchangeRateRequest {}

/// Query for a pair's history over a date range.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExchangeHistoryRequest {
    /// Base currency code (e.g., USD)
    #[param(value_type = String, pattern = "^[A-Z]{3}$", example = "USD")]
    pub base_currency: CurrencyCode,
    /// Target currency code (e.g., BRL)
    #[param(value_type = String, pattern = "^[A-Z]{3}$", example = "BRL")]
    pub target_currency: CurrencyCode,
    /// Start date in the format DDMMYYYY
    #[param(value_type = String, pattern = "^[0-9]{8}$", example = "01012024")]
    pub start_date: DateDigits,
    /// End date in the format DDMMYYYY
    #[param(value_type = String, pattern = "^[0-9]{8}$", example = "31012024")]
    pub end_date: DateDigits,
}

impl ExchangeHistoryRequest {
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.base_currency.clone(), self.target_currency.clone())
    }
}

impl Validate for ExchangeHistoryRequest {}

/// Query for a pair's history over the last `days` days.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExchangeLastDaysRequest {
    /// Base currency code (e.g., USD)
    #[param(value_type = String, pattern = "^[A-Z]{3}$", example = "USD")]
    pub base_currency: CurrencyCode,
    /// Target currency code (e.g., BRL)
    #[param(value_type = String, pattern = "^[A-Z]{3}$", example = "BRL")]
    pub target_currency: CurrencyCode,
    /// Number of days for the history (must be greater than 0)
    #[param(minimum = 1, example = 7)]
    pub days: i64,
}

impl ExchangeLastDaysRequest {
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.base_currency.clone(), self.target_currency.clone())
    }
}

impl Validate for ExchangeLastDaysRequest {
    fn validate(&self) -> Result<(), DomainError> {
        if self.days <= 0 {
            return Err(DomainError::ValidationError(
                "days must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Query for converting an amount at the latest rate.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConvertCurrencyRequest {
    /// Base currency code (e.g., USD)
    #[param(value_type = String, pattern = "^[A-Z]{3}$", example = "USD")]
    pub base_currency: CurrencyCode,
    /// Target currency code (e.g., BRL)
    #[param(value_type = String, pattern = "^[A-Z]{3}$", example = "BRL")]
    pub target_currency: CurrencyCode,
    /// Amount to be converted (must be greater than 0)
    #[param(example = 100.0)]
    pub amount: f64,
}

impl ConvertCurrencyRequest {
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.base_currency.clone(), self.target_currency.clone())
    }
}

impl Validate for ConvertCurrencyRequest {
    fn validate(&self) -> Result<(), DomainError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(DomainError::ValidationError(
                "amount must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Every pair the provider currently quotes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidCombinationsResponse {
    /// Pair key (`BASE-TARGET`) to description
    #[schema(example = json!({"USD-BRL": "Dólar Americano/Real Brasileiro"}))]
    pub valid_combinations: BTreeMap<String, String>,
}

/// Latest rate for a pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRateResponse {
    pub base_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    /// Bid quoted by the provider
    #[schema(example = 5.4321)]
    pub exchange_rate: f64,
    /// Quote creation time as reported by the provider
    #[schema(example = "2024-01-01 12:00:00")]
    pub timestamp: String,
}

/// Provider history for an explicit date range.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExchangeHistoryResponse {
    pub base_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    /// Start date as sent upstream (YYYYMMDD)
    #[schema(example = "20240101")]
    pub start_date: String,
    /// End date as sent upstream (YYYYMMDD)
    #[schema(example = "20240131")]
    pub end_date: String,
    /// Provider payload, forwarded unchanged
    #[schema(value_type = Vec<Object>)]
    pub history: serde_json::Value,
}

/// Provider history for the last N days.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExchangeLastDaysResponse {
    pub base_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    #[schema(example = 7)]
    pub days: i64,
    /// Provider payload, forwarded unchanged
    #[schema(value_type = Vec<Object>)]
    pub history: serde_json::Value,
}

/// Result of converting an amount at the latest rate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertCurrencyResponse {
    pub base_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    #[schema(example = 100.0)]
    pub amount: f64,
    #[schema(example = 5.0)]
    pub exchange_rate: f64,
    #[schema(example = 500.0)]
    pub converted_amount: f64,
}

/// Body of every failure response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invalid currency pair: USD-XXX. Check valid combinations.")]
    pub detail: String,
}
