//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use axum::Json;
use utoipa::OpenApi;

use fx_types::{
    ConvertCurrencyRequest, ConvertCurrencyResponse, CurrencyCode, ErrorResponse,
    ExchangeHistoryRequest, ExchangeHistoryResponse, ExchangeLastDaysRequest,
    ExchangeLastDaysResponse, ExchangeRateRequest, ExchangeRateResponse,
    ValidCombinationsResponse,
};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List valid currency combinations
#[utoipa::path(
    get,
    path = "/valid-combinations/",
    tag = "catalog",
    responses(
        (status = 200, description = "Pairs the provider quotes, with descriptions", body = ValidCombinationsResponse),
        (status = 404, description = "Catalog is empty", body = ErrorResponse),
        (status = 500, description = "Catalog could not be fetched or parsed", body = ErrorResponse)
    )
)]
async fn valid_combinations() {}

/// Latest exchange rate for a pair
#[utoipa::path(
    get,
    path = "/exchange-rate/",
    tag = "rates",
    params(ExchangeRateRequest),
    responses(
        (status = 200, description = "Latest quote", body = ExchangeRateResponse),
        (status = 400, description = "Pair not in the catalog", body = ErrorResponse),
        (status = 404, description = "Provider has no data for the pair", body = ErrorResponse),
        (status = 422, description = "Malformed query", body = ErrorResponse),
        (status = 500, description = "Provider unreachable or returned an unexpected payload", body = ErrorResponse)
    )
)]
async fn exchange_rate() {}

/// Exchange rate history between two dates
#[utoipa::path(
    get,
    path = "/exchange-history/",
    tag = "rates",
    params(ExchangeHistoryRequest),
    responses(
        (status = 200, description = "Daily history", body = ExchangeHistoryResponse),
        (status = 400, description = "Pair not in the catalog, or a date is not a calendar date", body = ErrorResponse),
        (status = 404, description = "Provider has no history for the pair", body = ErrorResponse),
        (status = 422, description = "Malformed query", body = ErrorResponse),
        (status = 500, description = "Provider unreachable or failing", body = ErrorResponse)
    )
)]
async fn exchange_history() {}

/// Exchange rate history for the last N days
#[utoipa::path(
    get,
    path = "/exchange-last-days/",
    tag = "rates",
    params(ExchangeLastDaysRequest),
    responses(
        (status = 200, description = "Daily history", body = ExchangeLastDaysResponse),
        (status = 400, description = "Pair not in the catalog", body = ErrorResponse),
        (status = 404, description = "Provider has no history for the pair", body = ErrorResponse),
        (status = 422, description = "Malformed query or days <= 0", body = ErrorResponse),
        (status = 500, description = "Provider unreachable or failing", body = ErrorResponse)
    )
)]
async fn exchange_last_days() {}

/// Convert an amount at the latest rate
#[utoipa::path(
    get,
    path = "/convert-currency/",
    tag = "rates",
    params(ConvertCurrencyRequest),
    responses(
        (status = 200, description = "Converted amount", body = ConvertCurrencyResponse),
        (status = 400, description = "Pair not in the catalog", body = ErrorResponse),
        (status = 404, description = "Provider has no data for the pair", body = ErrorResponse),
        (status = 422, description = "Malformed query or amount <= 0", body = ErrorResponse),
        (status = 500, description = "Provider unreachable or returned an unexpected payload", body = ErrorResponse)
    )
)]
async fn convert_currency() {}

/// OpenAPI documentation for the exchange-rate façade.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FX Gateway API",
        version = "1.0.0",
        description = "Validates currency pairs against the provider catalog and proxies rate, history and conversion queries.\n\n## Pair validation\n\nAny request carrying both `base_currency` and `target_currency` is checked against the catalog loaded at startup. Unknown pairs are rejected with 400 before the endpoint runs.",
        license(name = "MIT"),
    ),
    paths(
        health,
        valid_combinations,
        exchange_rate,
        exchange_history,
        exchange_last_days,
        convert_currency,
    ),
    components(
        schemas(
            CurrencyCode,
            ValidCombinationsResponse,
            ExchangeRateResponse,
            ExchangeHistoryResponse,
            ExchangeLastDaysResponse,
            ConvertCurrencyResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Currency pair catalog"),
        (name = "rates", description = "Rates, history and conversion proxied to the provider"),
    )
)]
pub struct ApiDoc;

/// Serves the generated document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/valid-combinations/",
            "/exchange-rate/",
            "/exchange-history/",
            "/exchange-last-days/",
            "/convert-currency/",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
