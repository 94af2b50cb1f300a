//! # LibRoster Notify
//!
//! Digest aggregation and delivery:
//! - `digest` — pure range/grouping functions over already-fetched shifts
//! - `render` — plain-text subjects and bodies for the digest emails
//! - `notifier` — the delivery seam (`Notifier` trait, SMTP via lettre)
//! - `dispatch` — ties store → digest → render → notifier together

pub mod digest;
pub mod dispatch;
pub mod notifier;
pub mod render;

pub use digest::{group_approved_by_volunteer, monthly_window, weekly_window, DIGEST_SEND_HOUR};
pub use dispatch::{send_invite, send_monthly_schedule, send_weekly_reminders, DigestReport};
pub use notifier::{Notifier, NullNotifier, SmtpNotifier};
