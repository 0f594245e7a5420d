//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use fx_types::{
    AppError, CatalogSource, ConvertCurrencyRequest, ConvertCurrencyResponse, ErrorResponse,
    ExchangeHistoryRequest, ExchangeHistoryResponse, ExchangeLastDaysRequest,
    ExchangeLastDaysResponse, ExchangeRateRequest, ExchangeRateResponse, RateProvider,
    ValidCombinationsResponse,
};

use super::extract::ValidatedQuery;
use crate::ExchangeService;

/// Application state shared across handlers.
pub struct AppState<P: RateProvider, C: CatalogSource> {
    pub service: ExchangeService<P, C>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidPair(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }

        let body = ErrorResponse {
            detail: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// List every pair the provider quotes.
#[tracing::instrument(skip(state))]
pub async fn valid_combinations<P: RateProvider, C: CatalogSource>(
    State(state): State<Arc<AppState<P, C>>>,
) -> Result<Json<ValidCombinationsResponse>, ApiError> {
    let combinations = state.service.valid_combinations().await?;
    Ok(Json(combinations))
}

/// Latest rate for a pair.
#[tracing::instrument(skip(state), fields(pair = %req.pair()))]
pub async fn exchange_rate<P: RateProvider, C: CatalogSource>(
    State(state): State<Arc<AppState<P, C>>>,
    ValidatedQuery(req): ValidatedQuery<ExchangeRateRequest>,
) -> Result<Json<ExchangeRateResponse>, ApiError> {
    let rate = state.service.exchange_rate(req).await?;
    Ok(Json(rate))
}

/// History for a pair between two dates.
#[tracing::instrument(skip(state), fields(pair = %req.pair(), start = %req.start_date, end = %req.end_date))]
pub async fn exchange_history<P: RateProvider, C: CatalogSource>(
    State(state): State<Arc<AppState<P, C>>>,
    ValidatedQuery(req): ValidatedQuery<ExchangeHistoryRequest>,
) -> Result<Json<ExchangeHistoryResponse>, ApiError> {
    let history = state.service.exchange_history(req).await?;
    Ok(Json(history))
}

/// History for a pair over the last N days.
#[tracing::instrument(skip(state), fields(pair = %req.pair(), days = req.days))]
pub async fn exchange_last_days<P: RateProvider, C: CatalogSource>(
    State(state): State<Arc<AppState<P, C>>>,
    ValidatedQuery(req): ValidatedQuery<ExchangeLastDaysRequest>,
) -> Result<Json<ExchangeLastDaysResponse>, ApiError> {
    let history = state.service.exchange_last_days(req).await?;
    Ok(Json(history))
}

/// Convert an amount at the latest rate.
#[tracing::instrument(skip(state), fields(pair = %req.pair(), amount = req.amount))]
pub async fn convert_currency<P: RateProvider, C: CatalogSource>(
    State(state): State<Arc<AppState<P, C>>>,
    ValidatedQuery(req): ValidatedQuery<ConvertCurrencyRequest>,
) -> Result<Json<ConvertCurrencyResponse>, ApiError> {
    let converted = state.service.convert_currency(req).await?;
    Ok(Json(converted))
}
