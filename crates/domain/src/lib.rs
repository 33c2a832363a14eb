//! # pumpscript-domain
//!
//! Pure domain model for scripting an insulin pump through its on-device menus.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error taxonomy
//! - Define the **command** ([`tbr::SetTbr`]) and its pre-flight **violations**
//! - Define the **screen** model scraped from the pump display (screen types,
//!   attribute kinds, typed attribute values, keys, step directions)
//! - Define the **command result** handed back to a dispatcher
//! - Define the **phases** a command walks through
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod key;

pub mod phase;
pub mod result;
pub mod screen;
pub mod tbr;
