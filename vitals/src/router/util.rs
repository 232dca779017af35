use tokio_util::sync::CancellationToken;
use vitals_core::VitalsError;

/// Join a collection of tasks and apply an optional request-level deadline.
///
/// This wraps `futures::future::join_all(tasks)` with `crate::core::with_request_deadline`.
/// Every task runs to completion; none is failed because another failed. On
/// timeout the in-flight tasks are dropped and `RequestTimeout` is returned.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<std::time::Duration>,
) -> Result<Vec<T>, VitalsError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    crate::core::with_request_deadline(deadline, futures::future::join_all(tasks)).await
}

/// Race `fut` against `cancel`; cancellation wins ties.
///
/// On cancellation `fut` is dropped, along with any work it had completed.
///
/// # Errors
/// Returns `Cancelled` if the token fires first, else whatever `fut` returns.
pub async fn with_cancellation<F, T>(cancel: &CancellationToken, fut: F) -> Result<T, VitalsError>
where
    F: core::future::Future<Output = Result<T, VitalsError>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(VitalsError::Cancelled),
        out = fut => out,
    }
}

/// Decide whether per-metric failures amount to a request-level failure.
///
/// Rules:
/// - If any error is request-fatal (e.g. a source rejecting the range) → that error.
/// - If every requested metric was denied → `AllAuthorizationDenied(errors)`.
/// - Else → `None`; the failures are reported as diagnostics alongside the
///   surviving metrics.
#[must_use]
pub fn collapse_failures(requested: usize, errors: &[VitalsError]) -> Option<VitalsError> {
    if let Some(fatal) = errors.iter().find(|e| e.is_request_fatal()) {
        return Some(fatal.clone());
    }
    let denied = errors
        .iter()
        .filter(|e| matches!(e, VitalsError::AuthorizationDenied { .. }))
        .count();
    if requested > 0 && denied == requested {
        return Some(VitalsError::AllAuthorizationDenied(errors.to_vec()));
    }
    None
}
