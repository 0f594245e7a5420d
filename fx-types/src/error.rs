//! Error types for the exchange-rate façade.

/// Domain-level errors (malformed request values).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("invalid currency code `{0}`: expected three uppercase letters")]
    InvalidCurrencyCode(String),

    #[error("invalid date `{0}`: expected eight digits (DDMMYYYY)")]
    InvalidDateDigits(String),

    #[error("`{0}` is not a calendar date in DDMMYYYY")]
    InvalidCalendarDate(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Failures talking to the rate provider.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream has no data for this request")]
    NotFound,

    #[error("upstream responded with status {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Contract(String),
}

impl UpstreamError {
    /// Maps to an HTTP-facing error. `not_found` is the handler's fixed
    /// message for an upstream 404.
    pub fn into_app_error(self, not_found: &str) -> AppError {
        match self {
            UpstreamError::NotFound => AppError::NotFound(not_found.to_string()),
            UpstreamError::Status(_) | UpstreamError::Transport(_) => {
                AppError::Internal(format!("Request error: {}", self))
            }
            UpstreamError::Contract(msg) => AppError::Internal(format!("Unexpected error: {}", msg)),
        }
    }
}

/// Failures fetching or parsing the catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(String),

    #[error("catalog source responded with status {0}")]
    Status(u16),

    #[error("catalog document could not be parsed: {0}")]
    Parse(String),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Transport(_) | CatalogError::Status(_) => {
                AppError::Internal(format!("Request error: {}", err))
            }
            CatalogError::Parse(_) => AppError::Internal(format!("Unexpected error: {}", err)),
        }
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid currency pair: {0}. Check valid combinations.")]
    InvalidPair(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidCalendarDate(_) => {
                AppError::BadRequest("Dates must be in the format DDMMYYYY.".into())
            }
            other => AppError::Validation(other.to_string()),
        }
    }
}
