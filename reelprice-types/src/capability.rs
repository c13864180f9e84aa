use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and telemetry.
///
/// These map one-to-one with orchestrator operations and allow consistent
/// Display formatting in error messages and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// A single provider's catalog listing.
    Catalog,
    /// A single movie's full record, including its price.
    Detail,
    /// Building the merged title index across providers.
    Index,
    /// Resolving the cheapest price for a title.
    Cheapest,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Detail => "detail",
            Self::Index => "index",
            Self::Cheapest => "cheapest-price",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
