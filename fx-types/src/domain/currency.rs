//! Currency codes and ordered currency pairs.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

static CURRENCY_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("currency code pattern is valid"));

/// Three-letter uppercase currency code, e.g. `USD`.
///
/// Construction is the only place the format is checked, so any
/// `CurrencyCode` in hand is known to match `^[A-Z]{3}$`. Deserialization
/// goes through [`TryFrom<String>`], which makes malformed codes fail at the
/// request boundary.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(try_from = "String")]
#[schema(value_type = String, example = "USD")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if CURRENCY_CODE_PATTERN.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidCurrencyCode(value))
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered base/target combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(base: CurrencyCode, target: CurrencyCode) -> Self {
        Self { base, target }
    }

    /// Catalog key, `BASE-TARGET`. Also the path segment used upstream.
    pub fn key(&self) -> String {
        pair_key(self.base.as_str(), self.target.as_str())
    }

    /// Key under which the upstream nests a quote, `BASETARGET`.
    pub fn quote_key(&self) -> String {
        format!("{}{}", self.base, self.target)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.target)
    }
}

/// Builds a catalog key from raw, unvalidated strings.
pub fn pair_key(base: &str, target: &str) -> String {
    format!("{}-{}", base, target)
}
