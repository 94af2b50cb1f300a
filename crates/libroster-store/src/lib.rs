//! # LibRoster Store
//!
//! Record store adapter for the roster: translates between the domain
//! records and a row-oriented backend, plus the lifecycle rules that sit on
//! top of raw row CRUD.
//!
//! ## Architecture
//! ```text
//! RosterService (rules: past-date guard, last-manager, duplicate proposals)
//!   └── dyn RosterStore (row CRUD, addressed by natural key only)
//!         ├── SheetsStore — Google Sheets values API over reqwest
//!         └── MemoryStore — in-process Vec, for development and tests
//! ```
//!
//! Row positions are bookkeeping private to each store; nothing above this
//! crate ever sees a row number.

pub mod memory;
pub mod schema;
pub mod service;
pub mod sheets;

use async_trait::async_trait;
use chrono::NaiveDate;
use libroster_core::{Shift, Volunteer};

pub use memory::MemoryStore;
pub use service::RosterService;
pub use sheets::SheetsStore;

/// Row-level CRUD over the two logical tables. Lookup failures come back as
/// `false` or an empty list, never as errors; backend failures are logged at
/// the adapter boundary and degrade the same way.
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// All volunteer rows with a non-empty email, in storage order.
    async fn list_volunteers(&self) -> Vec<Volunteer>;

    /// Append a new volunteer row. No uniqueness check — the caller owns
    /// duplicate-email hygiene.
    async fn add_volunteer(&self, volunteer: Volunteer) -> bool;

    /// Overwrite all fields of the row whose email matches. False if absent.
    async fn update_volunteer(&self, email: &str, volunteer: Volunteer) -> bool;

    /// Physically remove the matching row. False if absent.
    async fn delete_volunteer(&self, email: &str) -> bool;

    /// All shift rows, optionally filtered by volunteer email.
    async fn list_shifts(&self, volunteer_email: Option<&str>) -> Vec<Shift>;

    /// Append a new shift row in `Proposed` state.
    async fn propose_shift(&self, email: &str, date: NaiveDate) -> bool;

    /// Rewrite the status of the matching `(date, email)` row to `Approved`.
    /// Update-only: false when no row exists.
    async fn approve_shift(&self, date: NaiveDate, email: &str) -> bool;

    /// Upsert: rewrite the matching row's status to `Approved`, or append an
    /// `Approved` row when none exists. Idempotent in outcome.
    async fn assign_shift(&self, date: NaiveDate, email: &str) -> bool;

    /// Physically remove the matching `(date, email)` row. False if absent.
    async fn reject_shift(&self, date: NaiveDate, email: &str) -> bool;
}
