//! Application services: the commands a dispatcher can run on the pump.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod tbr_service;

use std::future::Future;

use pumpscript_domain::result::CommandResult;
use pumpscript_domain::tbr::Violation;

pub use tbr_service::SetTbrService;

/// Dispatcher-facing contract of a pump command.
///
/// `validate` is a pure pre-flight check; `execute` runs the command to
/// completion and reports every failure inside the returned result.
pub trait PumpCommand<C> {
    /// Every violated precondition of `command`. Empty means it may run.
    fn validate(&self, command: &C) -> Vec<Violation>;

    /// Run `command` against the pump.
    fn execute(&self, command: C) -> impl Future<Output = CommandResult> + Send;
}
