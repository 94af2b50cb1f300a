//! Digest dispatch — reads the store, groups approved shifts, renders, and
//! hands the result to the notifier. Everything runs synchronously inside
//! the triggering request; any periodic firing is an external cron's job.

use chrono::NaiveDate;
use libroster_core::{month_year, Result, Volunteer};
use libroster_store::RosterStore;
use serde::Serialize;

use crate::digest::{group_approved_by_volunteer, monthly_window, weekly_window};
use crate::notifier::Notifier;
use crate::render;

/// Outcome of one digest run. Per-recipient failures are logged and counted,
/// never fatal — the next run simply retries.
#[derive(Debug, Default, Serialize)]
pub struct DigestReport {
    pub sent: usize,
    pub failed: usize,
}

fn volunteer_name<'a>(volunteers: &'a [Volunteer], email: &str) -> Option<&'a str> {
    volunteers
        .iter()
        .find(|v| v.email == email)
        .map(|v| v.name.as_str())
}

/// Remind each volunteer of their approved shifts in the upcoming Sun–Sat
/// week.
pub async fn send_weekly_reminders(
    store: &dyn RosterStore,
    notifier: &dyn Notifier,
    today: NaiveDate,
) -> DigestReport {
    let shifts = store.list_shifts(None).await;
    let volunteers = store.list_volunteers().await;
    let (start, end) = weekly_window(today);

    let mut report = DigestReport::default();
    for (email, group) in group_approved_by_volunteer(&shifts, start, end) {
        // Shifts for an email with no volunteer row are stale — skip quietly.
        let Some(name) = volunteer_name(&volunteers, &email) else {
            continue;
        };
        let (subject, body) = render::weekly_reminder(name, &group);
        match notifier.send(&email, &subject, &body).await {
            Ok(()) => report.sent += 1,
            Err(e) => {
                tracing::warn!("⚠️ Weekly reminder to {email} failed: {e}");
                report.failed += 1;
            }
        }
    }
    tracing::info!(
        "📬 Weekly reminders: {} sent, {} failed (window {start}..{end})",
        report.sent,
        report.failed
    );
    report
}

/// Send each volunteer their approved shifts for next calendar month.
pub async fn send_monthly_schedule(
    store: &dyn RosterStore,
    notifier: &dyn Notifier,
    today: NaiveDate,
) -> DigestReport {
    let shifts = store.list_shifts(None).await;
    let volunteers = store.list_volunteers().await;
    let (start, end) = monthly_window(today);
    let month_label = month_year(start);

    let mut report = DigestReport::default();
    for (email, group) in group_approved_by_volunteer(&shifts, start, end) {
        let Some(name) = volunteer_name(&volunteers, &email) else {
            continue;
        };
        let (subject, body) = render::monthly_schedule(name, &month_label, &group);
        match notifier.send(&email, &subject, &body).await {
            Ok(()) => report.sent += 1,
            Err(e) => {
                tracing::warn!("⚠️ Monthly schedule to {email} failed: {e}");
                report.failed += 1;
            }
        }
    }
    tracing::info!(
        "📬 Monthly schedule ({month_label}): {} sent, {} failed",
        report.sent,
        report.failed
    );
    report
}

/// One-off invitation for a newly added volunteer.
pub async fn send_invite(
    notifier: &dyn Notifier,
    email: &str,
    volunteer_name: Option<&str>,
) -> Result<()> {
    let (subject, body) = render::invite(volunteer_name);
    notifier.send(email, &subject, &body).await
}
