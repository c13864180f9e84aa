//! Upstream provider identities.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ReelError;

/// One of the upstream movie-catalog services.
///
/// The declaration order is the merge precedence: when both providers list a
/// title, `Cinemaworld` records come before `Filmworld` records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// The `cinemaworld` catalog.
    Cinemaworld,
    /// The `filmworld` catalog.
    Filmworld,
}

impl Provider {
    /// Every provider, in merge precedence order.
    pub const ALL: [Self; 2] = [Self::Cinemaworld, Self::Filmworld];

    /// Path segment used by the upstream API (`/api/{provider}/...`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cinemaworld => "cinemaworld",
            Self::Filmworld => "filmworld",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cinemaworld" => Ok(Self::Cinemaworld),
            "filmworld" => Ok(Self::Filmworld),
            other => Err(ReelError::InvalidArg(format!("unknown provider '{other}'"))),
        }
    }
}
