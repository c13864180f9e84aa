//! Movie records, prices, and fetch outcomes.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Provider, ReelError};

/// A movie as listed by one provider.
///
/// Catalog listings never carry a price; detail fetches usually do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieRecord {
    /// Provider-scoped identifier used for the detail fetch.
    #[serde(rename = "ID")]
    pub id: String,
    /// Title with the provider's original casing and spacing.
    pub title: String,
    /// Release year as sent by the provider.
    #[serde(default)]
    pub year: String,
    /// Kind of media ("movie", ...).
    #[serde(rename = "Type", default)]
    pub kind: String,
    /// Poster image URL.
    #[serde(default)]
    pub poster: String,
    /// Decimal price text; present only on detail records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Provider that returned this record.
    pub provider: Provider,
}

/// A detail fetch result: the record plus every other attribute the provider sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetail {
    /// Core record, with `price` populated when the provider sent one.
    #[serde(flatten)]
    pub movie: MovieRecord,
    /// Remaining provider attributes (Rated, Director, Plot, ...), verbatim.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl MovieDetail {
    /// Parse the record's price, if it has a usable one.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the price is absent or not a decimal.
    pub fn price(&self) -> Result<Price, ReelError> {
        match self.movie.price.as_deref() {
            Some(text) => Price::parse(text),
            None => Err(ReelError::InvalidArg(format!(
                "{} record {} has no price",
                self.movie.provider, self.movie.id
            ))),
        }
    }
}

/// Upstream wire shape of a movie, before it is tagged with its provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawMovie {
    /// Provider-scoped identifier.
    #[serde(rename = "ID")]
    pub id: String,
    /// Title as sent.
    pub title: String,
    /// Release year.
    #[serde(default)]
    pub year: String,
    /// Media kind.
    #[serde(rename = "Type", default)]
    pub kind: String,
    /// Poster URL.
    #[serde(default)]
    pub poster: String,
    /// Price; providers send either a string or a bare number.
    #[serde(default)]
    pub price: Option<Value>,
    /// Everything else.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RawMovie {
    /// Attach the provider tag, producing a catalog-style record.
    #[must_use]
    pub fn tagged(self, provider: Provider) -> MovieRecord {
        self.tagged_detail(provider).movie
    }

    /// Attach the provider tag, keeping every extra attribute.
    #[must_use]
    pub fn tagged_detail(self, provider: Provider) -> MovieDetail {
        let price = match self.price {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        MovieDetail {
            movie: MovieRecord {
                id: self.id,
                title: self.title,
                year: self.year,
                kind: self.kind,
                poster: self.poster,
                price,
                provider,
            },
            attributes: self.extra,
        }
    }
}

/// A provider price: its numeric value plus the text it was received as.
///
/// Equality and ordering compare the numeric value only, so `"129.50"`
/// equals `"129.5"`; `Display` shows the original text.
#[derive(Debug, Clone)]
pub struct Price {
    text: String,
    value: Decimal,
}

impl Price {
    /// Parse a provider-supplied decimal string.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `text` is not a decimal number.
    pub fn parse(text: &str) -> Result<Self, ReelError> {
        let trimmed = text.trim();
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|e| ReelError::InvalidArg(format!("price '{text}' is not a decimal: {e}")))?;
        Ok(Self {
            text: text.to_string(),
            value,
        })
    }

    /// The price exactly as the provider sent it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Numeric value used for comparisons.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.value
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The winning offer of a price resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheapestPrice {
    /// Lowest price found.
    pub price: Price,
    /// Provider offering it.
    pub provider: Provider,
    /// Provider-scoped movie identifier.
    pub id: String,
}

/// Tagged result of an outbound call, as seen by the retry loop.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// The call produced a payload.
    Success(T),
    /// The call failed in a way a later attempt may not.
    TransientFailure(ReelError),
    /// The call failed in a way retrying cannot fix.
    Fatal(ReelError),
}

impl<T> FetchOutcome<T> {
    /// Convert back into a plain `Result`, dropping the transient/fatal distinction.
    ///
    /// # Errors
    /// Returns the carried error for either failure variant.
    pub fn into_result(self) -> Result<T, ReelError> {
        match self {
            Self::Success(v) => Ok(v),
            Self::TransientFailure(e) | Self::Fatal(e) => Err(e),
        }
    }

    /// Whether this outcome should be retried.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::TransientFailure(_))
    }
}

impl<T> From<Result<T, ReelError>> for FetchOutcome<T> {
    fn from(res: Result<T, ReelError>) -> Self {
        match res {
            Ok(v) => Self::Success(v),
            Err(e) if e.is_transient() => Self::TransientFailure(e),
            Err(e) => Self::Fatal(e),
        }
    }
}
