//! Reelprice aggregates movie catalogs from several providers and finds the
//! cheapest price for a title.
//!
//! Overview
//! - Talks to connectors that implement the `reelprice_core` contracts, one per provider.
//! - [`Reel::build_index`] fetches every catalog concurrently and merges them
//!   into a [`TitleIndex`] keyed by normalized title.
//! - [`Reel::cheapest`] fetches the detail record of every offer for a title
//!   concurrently and returns the numerically lowest price.
//!
//! Key behaviors and trade-offs
//! - Every provider call is retried with exponential backoff while it fails
//!   transiently. The interactive preset retries forever; the served preset
//!   caps the delay, bounds the attempts and adds a request deadline.
//! - Catalog policy: `RequireAll` refuses to build an index from partial data;
//!   `AllowPartial` drops a failing provider and keeps going.
//! - Detail failures never fail a price resolution on their own; the offer is
//!   skipped and the remaining offers decide the winner.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use reelprice::{Reel, ReelConfig};
//! use reelprice_http::HttpConnector;
//!
//! let cfg = reelprice::ProviderConfig::new("https://movies.example", token)?;
//! let mut builder = Reel::builder().config(ReelConfig::served());
//! for c in HttpConnector::pair(&cfg)? {
//!     builder = builder.with_connector(Arc::new(c));
//! }
//! let reel = builder.build()?;
//!
//! let index = reel.build_index().await?;
//! match reel.cheapest("Star Wars: Episode VI - Return of the Jedi", &index).await {
//!     Ok(best) => println!("{} at {}", best.price, best.provider),
//!     Err(e) if e.is_not_found() => println!("not listed"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use crate::core::{Reel, ReelBuilder, tag_err, with_request_deadline};
pub use router::retry::{Retrier, jitter_wait};
pub use router::util::{collapse_errors, join_with_deadline};

// Re-export core types for convenience
pub use reelprice_core::{
    BackoffConfig, Capability, CatalogPolicy, CheapestPrice, FetchOutcome, MovieDetail,
    MovieRecord, NormalizedTitle, Price, Provider, ProviderConfig, ReelConfig, ReelConnector,
    ReelError, RetryPolicy, RetryStop, TitleIndex,
};
