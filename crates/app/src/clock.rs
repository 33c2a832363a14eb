//! Wall-clock implementation of the [`Clock`] port.

use std::future::Future;
use std::time::Duration;

use crate::ports::Clock;

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_sleep_for_requested_duration() {
        let start = std::time::Instant::now();

        TokioClock.sleep(Duration::from_millis(5)).await;

        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
