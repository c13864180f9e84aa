use reelprice_core::{Capability, ReelError};

/// Join fallible tasks under an optional request-level deadline.
///
/// Stops at the first task that fails, dropping the rest. This wraps
/// `futures::future::try_join_all(tasks)` with `crate::core::with_request_deadline`.
pub async fn join_with_deadline<I, F, T>(
    capability: Capability,
    tasks: I,
    deadline: Option<std::time::Duration>,
) -> Result<Vec<T>, ReelError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = Result<T, ReelError>>,
{
    crate::core::with_request_deadline(capability, deadline, futures::future::try_join_all(tasks))
        .await?
}

/// Collapse a set of provider errors into a single `ReelError`.
///
/// Rules:
/// - A single error is returned as-is.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - Else → `AllProvidersFailed(errors)`.
pub fn collapse_errors(mut errors: Vec<ReelError>, not_found_what: Option<String>) -> ReelError {
    if errors.len() == 1
        && let Some(only) = errors.pop()
    {
        return only;
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors.iter().all(ReelError::is_not_found)
    {
        return ReelError::not_found(what);
    }
    ReelError::AllProvidersFailed(errors)
}
