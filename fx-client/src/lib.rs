//! # FX Client SDK
//!
//! A typed Rust client for the exchange-rate façade.

use fx_types::{
    ConvertCurrencyRequest, ConvertCurrencyResponse, ExchangeHistoryRequest,
    ExchangeHistoryResponse, ExchangeLastDaysRequest, ExchangeLastDaysResponse,
    ExchangeRateRequest, ExchangeRateResponse, ValidCombinationsResponse,
};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {detail}")]
    Api { status: u16, detail: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// FX gateway API client.
pub struct FxClient {
    base_url: String,
    http: Client,
}

impl FxClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(base_url, Client::new())
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    pub fn with_http(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Lists every pair the provider quotes.
    pub async fn valid_combinations(&self) -> Result<ValidCombinationsResponse, ClientError> {
        let no_query: [(&str, &str); 0] = [];
        self.get("/valid-combinations/", &no_query).await
    }

    /// Gets the latest rate for a pair.
    pub async fn exchange_rate(
        &self,
        req: &ExchangeRateRequest,
    ) -> Result<ExchangeRateResponse, ClientError> {
        self.get("/exchange-rate/", req).await
    }

    /// Gets a pair's history between two dates.
    pub async fn exchange_history(
        &self,
        req: &ExchangeHistoryRequest,
    ) -> Result<ExchangeHistoryResponse, ClientError> {
        self.get("/exchange-history/", req).await
    }

    /// Gets a pair's history over the last N days.
    pub async fn exchange_last_days(
        &self,
        req: &ExchangeLastDaysRequest,
    ) -> Result<ExchangeLastDaysResponse, ClientError> {
        self.get("/exchange-last-days/", req).await
    }

    /// Converts an amount at the latest rate.
    pub async fn convert_currency(
        &self,
        req: &ConvertCurrencyRequest,
    ) -> Result<ConvertCurrencyResponse, ClientError> {
        self.get("/convert-currency/", req).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────────

    async fn get<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                detail,
            })
        }
    }
}
