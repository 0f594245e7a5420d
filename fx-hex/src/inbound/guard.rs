//! Request guards run before routing reaches a handler.
//!
//! A [`GuardChain`] is an ordered list of [`RequestGuard`]s installed as a
//! single middleware. Each guard either lets the request through or rejects
//! it with an [`AppError`]; the first rejection becomes the response.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, Uri, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use fx_types::{AppError, PairCatalog, domain::pair_key};

use super::handlers::ApiError;

/// A single pass/reject check on an inbound request.
pub trait RequestGuard: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn check(&self, parts: &Parts) -> Result<(), AppError>;
}

/// Guards applied in insertion order.
#[derive(Clone, Default)]
pub struct GuardChain {
    guards: Vec<Arc<dyn RequestGuard>>,
}

impl GuardChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a guard to the end of the chain.
    pub fn with(mut self, guard: impl RequestGuard + 'static) -> Self {
        self.guards.push(Arc::new(guard));
        self
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Runs every guard until one rejects.
    pub fn check(&self, parts: &Parts) -> Result<(), AppError> {
        for guard in &self.guards {
            if let Err(err) = guard.check(parts) {
                tracing::info!(guard = guard.name(), path = %parts.uri.path(), "Request rejected: {}", err);
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Middleware running a [`GuardChain`] ahead of the handlers.
pub async fn guard_middleware(
    State(chain): State<Arc<GuardChain>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();

    if let Err(err) = chain.check(&parts) {
        return ApiError(err).into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}

/// Rejects requests naming a base/target combination the provider does not
/// quote.
///
/// Only looks at the raw `base_currency` and `target_currency` query
/// values, compared exactly as sent. When either is missing or empty the
/// request passes untouched, which is what lets parameterless endpoints
/// through. Format checks are left to the per-endpoint schema.
pub struct PairGate {
    catalog: Arc<PairCatalog>,
}

impl PairGate {
    pub fn new(catalog: Arc<PairCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PairCatalog {
        &self.catalog
    }
}

impl RequestGuard for PairGate {
    fn name(&self) -> &'static str {
        "pair_gate"
    }

    fn check(&self, parts: &Parts) -> Result<(), AppError> {
        let Some((base, target)) = currency_params(&parts.uri) else {
            return Ok(());
        };

        if self.catalog.allows(&base, &target) {
            Ok(())
        } else {
            Err(AppError::InvalidPair(pair_key(&base, &target)))
        }
    }
}

/// Both currency query values, if present and non-empty.
fn currency_params(uri: &Uri) -> Option<(String, String)> {
    let Query(mut params) = Query::<HashMap<String, String>>::try_from_uri(uri).ok()?;
    let base = params.remove("base_currency").filter(|v| !v.is_empty())?;
    let target = params.remove("target_currency").filter(|v| !v.is_empty())?;
    Some((base, target))
}
