//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the command engine and the outside world.
//! They are defined here (in `app`) so that both the engine and the adapter
//! layer can depend on them without creating circular dependencies.

pub mod clock;
pub mod navigator;
pub mod observer;

pub use clock::Clock;
pub use navigator::PumpNavigator;
pub use observer::{CommandObserver, Observation};
