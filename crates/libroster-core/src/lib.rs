//! # LibRoster Core
//!
//! Shared foundation for the LibRoster volunteer scheduling system:
//! domain types (volunteers, shifts), the error taxonomy, and TOML
//! configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::RosterConfig;
pub use error::{Result, RosterError};
pub use types::{Shift, ShiftStatus, Volunteer, month_year};
