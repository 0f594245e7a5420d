//! Query extractor that applies the request schema.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use fx_types::{AppError, Validate};

use super::handlers::ApiError;

/// Like [`Query`], but also runs [`Validate`] on the result.
///
/// Both a query string that does not deserialize (missing field, bad
/// currency code, non-numeric `days`) and a failed [`Validate`] check are
/// rejected with 422 before the handler runs.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::try_from_uri(&parts.uri)
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        value.validate().map_err(AppError::from)?;

        Ok(ValidatedQuery(value))
    }
}
