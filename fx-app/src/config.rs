//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use fx_upstream::DEFAULT_CATALOG_URL;

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    /// Base URL of the rate/history provider
    pub external_api_url: String,
    /// Forwarded as `x-api-key`; `None` when unset or empty
    pub api_key: Option<String>,
    pub currency_xml_url: String,
    pub upstream_timeout: Duration,
    /// Extra attempts on upstream transport failures
    pub upstream_retries: usize,
    /// OTLP collector; span export is off when unset
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("PORT must be a port number: {}", e))?;

        let external_api_url = lookup("EXTERNAL_API_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("EXTERNAL_API_URL environment variable is required"))?;

        let api_key = lookup("API_KEY").filter(|key| !key.is_empty());

        let currency_xml_url =
            lookup("CURRENCY_XML_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());

        let timeout_secs: u64 = lookup("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS must be a whole number: {}", e))?;
        if timeout_secs == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be greater than 0");
        }

        let upstream_retries: usize = lookup("UPSTREAM_RETRIES")
            .unwrap_or_else(|| "0".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("UPSTREAM_RETRIES must be a whole number: {}", e))?;

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|e| !e.is_empty());

        Ok(Self {
            port,
            external_api_url,
            api_key,
            currency_xml_url,
            upstream_timeout: Duration::from_secs(timeout_secs),
            upstream_retries,
            otlp_endpoint,
        })
    }
}
