//! Presenters for reelprice: an interactive terminal menu and an HTTP API.
//!
//! Both build a fresh title index per request and never show raw upstream
//! errors; failures are reduced to a short description by [`describe_error`].

pub mod cli;
pub mod config;
pub mod interactive;
pub mod server;

use reelprice::ReelError;

/// Short, user-facing description of a failed operation.
#[must_use]
pub fn describe_error(e: &ReelError) -> String {
    match e {
        ReelError::Config(msg) => format!("configuration problem: {msg}"),
        ReelError::InvalidArg(msg) => msg.clone(),
        ReelError::NotFound { what } => format!("{what} not found"),
        ReelError::RequestTimeout { .. } => "providers did not answer in time".to_string(),
        ReelError::RetriesExhausted {
            capability,
            attempts,
            ..
        } => format!("{capability} kept failing after {attempts} attempts"),
        ReelError::AllProvidersFailed(_) => "every movie provider is unavailable".to_string(),
        _ => "movie providers are unavailable right now".to_string(),
    }
}
