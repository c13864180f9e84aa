//! reelprice-core
//!
//! Core types, traits, and utilities shared across the reelprice workspace.
//!
//! - `types`: movie records, detail records, prices, and fetch outcomes.
//! - `title`: title normalization and the merged `TitleIndex`.
//! - `connector`: the `ReelConnector` trait and capability provider traits.
#![warn(missing_docs)]

/// Connector capability traits and the primary `ReelConnector` interface.
pub mod connector;
/// Title normalization and the cross-provider title index.
pub mod title;
/// Movie records, prices, and fetch outcomes.
pub mod types;

pub use connector::{CatalogProvider, DetailProvider, ReelConnector};
pub use reelprice_types::{
    BackoffConfig, Capability, CatalogPolicy, Provider, ProviderConfig, ReelConfig, ReelError,
    RetryPolicy, RetryStop,
};
pub use title::{NormalizedTitle, TitleIndex};
pub use types::{CheapestPrice, FetchOutcome, MovieDetail, MovieRecord, Price, RawMovie};
