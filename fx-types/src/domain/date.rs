//! Eight-digit date parameters.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

static DATE_DIGITS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}$").expect("date pattern is valid"));

/// Input layout, day first.
const INPUT_FORMAT: &str = "%d%m%Y";
/// Layout the provider expects, year first.
const UPSTREAM_FORMAT: &str = "%Y%m%d";

/// Exactly eight ASCII digits, meant to be read as `DDMMYYYY`.
///
/// Only the shape is guaranteed; whether the digits form a real calendar
/// date is checked by [`DateDigits::to_upstream_format`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct DateDigits(String);

impl DateDigits {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reads the digits as `DDMMYYYY` and rewrites them as `YYYYMMDD`.
    ///
    /// Year `0000` is rejected along with impossible days and months.
    pub fn to_upstream_format(&self) -> Result<String, DomainError> {
        NaiveDate::parse_from_str(&self.0, INPUT_FORMAT)
            .ok()
            .filter(|date| date.year() >= 1)
            .map(|date| date.format(UPSTREAM_FORMAT).to_string())
            .ok_or_else(|| DomainError::InvalidCalendarDate(self.0.clone()))
    }
}

impl TryFrom<String> for DateDigits {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if DATE_DIGITS_PATTERN.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidDateDigits(value))
        }
    }
}

impl FromStr for DateDigits {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl fmt::Display for DateDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
