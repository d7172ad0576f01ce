//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap blocking I/O with an optional deadline
//! - Surface an elapsed deadline as `io::ErrorKind::TimedOut`
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - No deadline configured means the call may wait forever

use std::future::Future;
use std::io;
use std::time::Duration;

/// Run `fut`, failing with `TimedOut` if `limit` elapses first.
pub async fn with_timeout<F, T>(limit: Option<Duration>, fut: F) -> io::Result<T>
where
    F: Future<Output = io::Result<T>>,
{
    match limit {
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("operation timed out after {:?}", limit),
            )),
        },
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_limit_passes_through() {
        let value = with_timeout(None, async { Ok::<_, io::Error>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn elapsed_limit_is_timed_out() {
        let err = with_timeout(Some(Duration::from_millis(10)), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, io::Error>(())
        })
        .await
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }
}
