//! Error taxonomy for LibRoster.
//!
//! Record-not-found is never an error — store operations return `false` or an
//! empty list instead, so the UI can show a plain retry message. Only the two
//! rule violations (last-manager demotion, past-date mutation) carry specific
//! user-facing messages.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RosterError>;

#[derive(Error, Debug)]
pub enum RosterError {
    /// Demoting the sole remaining manager is refused.
    #[error("cannot remove the last manager")]
    InvariantViolation,

    /// State-changing shift actions on elapsed dates are refused before any
    /// store write happens.
    #[error("cannot change shifts on a past date: {0}")]
    PastDate(chrono::NaiveDate),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("notification error: {0}")]
    Notify(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
