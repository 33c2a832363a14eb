//! Clock port, the engine's only source of waiting.

use std::future::Future;
use std::time::Duration;

/// Suspends the current command for a fixed delay.
///
/// Injected so tests can run whole commands without real sleeps.
pub trait Clock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}
