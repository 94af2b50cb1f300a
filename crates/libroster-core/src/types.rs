//! Domain records: volunteers and shifts.
//!
//! Wire names are camelCase to match the existing frontend payloads
//! (`volunteerEmail`, `isManager`, `monthYear`).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A library volunteer. `email` is the unique key; weekly availability is a
/// simple Monday..Friday flag set (the library is closed on weekends for
/// staffing purposes — shifts themselves may still fall on any date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub monday: bool,
    #[serde(default)]
    pub tuesday: bool,
    #[serde(default)]
    pub wednesday: bool,
    #[serde(default)]
    pub thursday: bool,
    #[serde(default)]
    pub friday: bool,
    #[serde(default)]
    pub is_manager: bool,
}

/// Shift lifecycle status. `Assigned` survives in stored data from older
/// rows; new manager assignments land directly as `Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    Proposed,
    Approved,
    Assigned,
}

impl ShiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Proposed => "proposed",
            ShiftStatus::Approved => "approved",
            ShiftStatus::Assigned => "assigned",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "proposed" => Some(ShiftStatus::Proposed),
            "approved" => Some(ShiftStatus::Approved),
            "assigned" => Some(ShiftStatus::Assigned),
            _ => None,
        }
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One volunteer on one date. Natural key is `(date, volunteer_email)`;
/// there is deliberately no one-shift-per-day rule — several volunteers can
/// staff the same day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub date: NaiveDate,
    pub volunteer_email: String,
    pub status: ShiftStatus,
    /// Derived display label ("March 2024"), computed at write time.
    #[serde(default)]
    pub month_year: String,
}

impl Shift {
    pub fn new(date: NaiveDate, volunteer_email: impl Into<String>, status: ShiftStatus) -> Self {
        Self {
            date,
            volunteer_email: volunteer_email.into(),
            status,
            month_year: month_year(date),
        }
    }

    /// True when this shift falls inside `[start, end)`.
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date >= start && self.date < end
    }
}

/// Display label for the month a date falls in.
pub fn month_year(date: NaiveDate) -> String {
    format!("{} {}", month_name(date.month()), date.year())
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}
