//! Virtual pump error types.

use pumpscript_domain::error::PumpScriptError;

/// Failures of the simulated link to the pump.
#[derive(Debug, thiserror::Error)]
pub enum VirtualPumpError {
    /// The injected disconnect fault fired.
    #[error("connection to virtual pump lost after {calls} calls")]
    Disconnected { calls: u32 },
}

impl VirtualPumpError {
    /// Convert into a [`PumpScriptError::Driver`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> PumpScriptError {
        PumpScriptError::Driver(Box::new(self))
    }
}

impl From<VirtualPumpError> for PumpScriptError {
    fn from(err: VirtualPumpError) -> Self {
        err.into_domain()
    }
}
