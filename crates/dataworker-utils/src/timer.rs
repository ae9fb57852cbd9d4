use std::{future::Future, time::Duration};

use tokio::time::Instant;

/// Times an async closure, returning its result alongside the elapsed wall
/// time. Used to record cycle/root-build durations without threading a
/// stopwatch through every call site.
pub async fn async_time_fn<F, Fut, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>
{
    let start = Instant::now();
    let result = f().await;
    (result, start.elapsed())
}
