//! # pumpscript-app
//!
//! Application layer: the command engine, use-cases and **port definitions**.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `PumpNavigator`: screen reads, key presses, menu transitions
//!   - `Clock`: the only way the engine waits
//!   - `CommandObserver`: progress records for a running command
//! - Define **driving/inbound ports**:
//!   - `PumpCommand`: validate and execute, implemented by `SetTbrService`
//! - Provide the **engine components** (navigation, convergence, commit,
//!   verification) that commands are scripted from
//! - Provide **in-process infrastructure** that needs no device IO
//!   (`TokioClock`, `TracingObserver`)
//!
//! ## Dependency rule
//! Depends on `pumpscript-domain` only (plus `tokio::time` for sleeping).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod clock;
pub mod config;
pub mod engine;
pub mod observer;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
