//! HTTP adapter for the currency-data provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use fx_types::{CurrencyPair, ExchangeQuote, RateProvider, UpstreamError};

use crate::retry::with_retry;

/// Header carrying the provider API key.
pub const API_KEY_HEADER: &str = "x-api-key";

const RETRY_DELAY: Duration = Duration::from_millis(250);

/// Client for the provider's `/last` and `/daily` endpoints.
pub struct AwesomeApiClient {
    base_url: String,
    api_key: Option<String>,
    retries: usize,
    http: Client,
}

impl AwesomeApiClient {
    /// Creates a client for `base_url`. Trailing slashes are trimmed.
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            retries: 0,
            http,
        }
    }

    /// Sets the API key sent as `x-api-key`. An empty key counts as no key.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    /// Extra attempts on transport failures. HTTP statuses are never retried.
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError> {
        debug!(%url, "Requesting upstream");

        let response = with_retry(
            || {
                let mut req = self.http.get(url);
                if let Some(key) = &self.api_key {
                    req = req.header(API_KEY_HEADER, key);
                }
                req.send()
            },
            self.retries,
            RETRY_DELAY,
        )
        .await
        .map_err(|e| {
            warn!(%url, error = %e, "Upstream request failed");
            UpstreamError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound);
        }
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Upstream returned an error status");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::Contract(format!("invalid JSON payload: {}", e)))
    }
}

/// One entry of a `/last` payload.
#[derive(Debug, Deserialize)]
struct QuoteDto {
    #[serde(deserialize_with = "number_or_numeric_string")]
    bid: f64,
    create_date: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// The provider sends decimals as strings (`"5.4321"`); plain numbers are
/// accepted too.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn extract_quote(mut payload: Value, pair: &CurrencyPair) -> Result<ExchangeQuote, UpstreamError> {
    let key = pair.quote_key();
    let entry = payload
        .get_mut(&key)
        .map(Value::take)
        .ok_or_else(|| UpstreamError::Contract(format!("missing key `{}` in upstream payload", key)))?;

    let dto: QuoteDto = serde_json::from_value(entry)
        .map_err(|e| UpstreamError::Contract(format!("malformed quote for `{}`: {}", key, e)))?;

    Ok(ExchangeQuote {
        bid: dto.bid,
        create_date: dto.create_date,
    })
}

#[async_trait]
impl RateProvider for AwesomeApiClient {
    async fn last_quote(&self, pair: &CurrencyPair) -> Result<ExchangeQuote, UpstreamError> {
        let url = format!("{}/last/{}", self.base_url, pair.key());
        let payload = self.get_json(&url).await?;
        extract_quote(payload, pair)
    }

    async fn daily_range(
        &self,
        pair: &CurrencyPair,
        start_date: &str,
        end_date: &str,
    ) -> Result<Value, UpstreamError> {
        let url = format!(
            "{}/daily/{}/?start_date={}&end_date={}",
            self.base_url,
            pair.key(),
            start_date,
            end_date
        );
        self.get_json(&url).await
    }

    async fn daily_last_days(&self, pair: &CurrencyPair, days: i64) -> Result<Value, UpstreamError> {
        let url = format!("{}/daily/{}/{}", self.base_url, pair.key(), days);
        self.get_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn usd_brl() -> CurrencyPair {
        CurrencyPair::new("USD".parse().unwrap(), "BRL".parse().unwrap())
    }

    #[test]
    fn test_extract_quote_from_string_bid() {
        let payload = json!({
            "USDBRL": { "bid": "5.4321", "create_date": "2024-01-01 12:00:00", "ask": "5.44" }
        });
        let quote = extract_quote(payload, &usd_brl()).unwrap();
        assert_eq!(quote.bid, 5.4321);
        assert_eq!(quote.create_date, "2024-01-01 12:00:00");
    }

    #[test]
    fn test_extract_quote_from_numeric_bid() {
        let payload = json!({ "USDBRL": { "bid": 5.0, "create_date": "x" } });
        assert_eq!(extract_quote(payload, &usd_brl()).unwrap().bid, 5.0);
    }

    #[test]
    fn test_missing_key_is_contract_error() {
        let payload = json!({ "EURBRL": { "bid": "6.0", "create_date": "x" } });
        assert!(matches!(
            extract_quote(payload, &usd_brl()),
            Err(UpstreamError::Contract(msg)) if msg.contains("USDBRL")
        ));
    }

    #[test]
    fn test_unparsable_bid_is_contract_error() {
        let payload = json!({ "USDBRL": { "bid": "n/a", "create_date": "x" } });
        assert!(matches!(
            extract_quote(payload, &usd_brl()),
            Err(UpstreamError::Contract(_))
        ));
    }

    #[test]
    fn test_empty_api_key_counts_as_unset() {
        let client = AwesomeApiClient::new("http://localhost/", Client::new())
            .with_api_key(Some(String::new()));
        assert!(client.api_key.is_none());
        assert_eq!(client.base_url(), "http://localhost");
    }
}
