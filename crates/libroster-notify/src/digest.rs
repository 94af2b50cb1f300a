//! Digest aggregation — pure functions over an already-fetched shift list.
//! No store access and no message content here; this module only computes
//! windows and groups rows.

use chrono::{Datelike, Duration, NaiveDate};
use libroster_core::{Shift, ShiftStatus};
use std::collections::BTreeMap;

/// Local hour at which the external cron trigger fires the digests.
pub const DIGEST_SEND_HOUR: u32 = 8;

/// Rolling 7-day window starting at the upcoming Sunday: `[sunday, sunday+7)`,
/// one full Sun–Sat week. When today is already Sunday the window starts a
/// week out, matching the reminder being about *next* week.
pub fn weekly_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_until_sunday = 7 - today.weekday().num_days_from_sunday();
    let start = today + Duration::days(days_until_sunday as i64);
    (start, start + Duration::days(7))
}

/// The whole of next calendar month: `[first of next month, first of the
/// month after)`.
pub fn monthly_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = first_of_following_month(today);
    (start, first_of_following_month(start))
}

fn first_of_following_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // Day 1 of a real month always exists.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// Filter to approved shifts inside `[start, end)` and partition by
/// volunteer email. Each group is sorted by date; the map itself iterates in
/// email order, so digest output is deterministic.
pub fn group_approved_by_volunteer(
    shifts: &[Shift],
    start: NaiveDate,
    end: NaiveDate,
) -> BTreeMap<String, Vec<Shift>> {
    let mut groups: BTreeMap<String, Vec<Shift>> = BTreeMap::new();
    for shift in shifts {
        if shift.status == ShiftStatus::Approved && shift.in_range(start, end) {
            groups
                .entry(shift.volunteer_email.clone())
                .or_default()
                .push(shift.clone());
        }
    }
    for group in groups.values_mut() {
        group.sort_by_key(|s| s.date);
    }
    groups
}
