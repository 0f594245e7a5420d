//! # FX Upstream
//!
//! Outbound adapters implementing the ports defined in `fx-types`:
//!
//! - [`AwesomeApiClient`] - `RateProvider` over the currency-data HTTP API
//! - [`HttpCatalogSource`] - `CatalogSource` over the XML catalog document
//!
//! Both share one `reqwest::Client` built by [`build_http_client`], which
//! carries the per-request timeout.

mod catalog;
mod client;
mod retry;

use std::time::Duration;

pub use catalog::{DEFAULT_CATALOG_URL, HttpCatalogSource, parse_catalog_xml};
pub use client::{API_KEY_HEADER, AwesomeApiClient};
pub use retry::with_retry;

/// Default timeout applied to every outbound request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds the HTTP client shared by all upstream adapters.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("fx-gateway/", env!("CARGO_PKG_VERSION")))
        .build()
}
