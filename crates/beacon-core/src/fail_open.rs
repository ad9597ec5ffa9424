//! Fail-open helpers for the pipeline boundaries
//!
//! A collector embedded in a host page must never break that page. Storage
//! and delivery failures therefore degrade to logged no-ops at the boundary,
//! while the internals keep typed errors for the tests.
//!
//! There is deliberately no retry variant: a record that fails delivery is
//! not recoverable.

use std::future::Future;
use tracing::debug;

use crate::Result;

/// Discard the error of a fallible synchronous operation
///
/// Logs at `debug` on failure and returns `None`. Used at the storage
/// boundary, where "could not persist" must look identical to "nothing
/// persisted" from the embedder's point of view.
pub fn fail_open<T>(operation_name: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(val) => Some(val),
        Err(e) => {
            debug!("{} failed (fail-open): {}", operation_name, e);
            None
        }
    }
}

/// Discard the error of a fallible asynchronous operation
///
/// The transport boundary: all delivery outcomes collapse to `Option`, and
/// the caller never observes which failure class occurred.
pub async fn fail_open_async<F, Fut, T>(operation_name: &str, f: F) -> Option<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match f().await {
        Ok(val) => Some(val),
        Err(e) => {
            debug!("{} failed (fail-open): {}", operation_name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BeaconError;

    #[test]
    fn test_fail_open_success() {
        let result = fail_open("test_op", Ok::<_, BeaconError>(42));
        assert_eq!(result, Some(42));
    }

    #[test]
    fn test_fail_open_failure() {
        let result = fail_open::<i32>("test_op", Err(BeaconError::Other("nope".to_string())));
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_fail_open_async_success() {
        let result = fail_open_async("test_op", || async { Ok::<_, BeaconError>("ok") }).await;
        assert_eq!(result, Some("ok"));
    }

    #[tokio::test]
    async fn test_fail_open_async_failure() {
        let result = fail_open_async("test_op", || async {
            Err::<i32, _>(BeaconError::Network("refused".to_string()))
        })
        .await;
        assert_eq!(result, None);
    }
}
