#![allow(dead_code)]

pub use waitgate_test_utils::init_tracing;

/// Run a future with a 5-second timeout.
///
/// With a paused Tokio clock the timeout auto-advances too, so only use
/// this around tests that run on real time.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}
