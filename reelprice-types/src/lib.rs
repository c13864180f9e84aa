//! Shared reelprice error, provider, and configuration types.
#![warn(missing_docs)]

mod capability;
mod config;
mod error;
mod provider;

pub use capability::Capability;
pub use config::{
    BackoffConfig, CatalogPolicy, ProviderConfig, ReelConfig, RetryPolicy, RetryStop,
};
pub use error::ReelError;
pub use provider::Provider;
