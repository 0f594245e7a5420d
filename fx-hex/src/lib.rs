//! # FX Hex
//!
//! Application service layer and HTTP adapter for the exchange-rate façade.
//!
//! ## Architecture
//!
//! - `service/` - Application service (maps requests to upstream calls and
//!   reshapes the results)
//! - `inbound/` - HTTP adapter (Axum server, guard chain, validated queries)
//! - `openapi/` - OpenAPI document served at `/openapi.json`
//!
//! The service is generic over `P: RateProvider` and `C: CatalogSource`,
//! allowing the HTTP upstreams to be swapped for in-memory fakes.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::ExchangeService;
