//! Column schema for the two spreadsheet tables.
//!
//! Column order is fixed and positional; both encode and decode go through
//! the ordered column lists below, so moving a column is a one-line edit here
//! plus a sheet migration — never a scatter of magic indices.
//! Row 1 of each sheet is a header row and is never treated as data.

use chrono::NaiveDate;
use libroster_core::{Shift, ShiftStatus, Volunteer, month_year};

pub const VOLUNTEERS_SHEET: &str = "Volunteers";
pub const SHIFTS_SHEET: &str = "Shifts";

/// `Volunteers` columns A..I.
pub const VOLUNTEER_COLUMNS: &[&str] = &[
    "name",
    "phone",
    "email",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "is_manager",
];

/// `Shifts` columns A..D.
pub const SHIFT_COLUMNS: &[&str] = &["date", "volunteer_email", "status", "month_year"];

const DATE_FORMAT: &str = "%Y-%m-%d";

fn column_letter(index: usize) -> char {
    // Both tables fit inside A..Z.
    (b'A' + index as u8) as char
}

/// Data range of a whole table, skipping the header row ("Volunteers!A2:I").
pub fn data_range(sheet: &str, columns: &[&str]) -> String {
    format!("{sheet}!A2:{}", column_letter(columns.len() - 1))
}

/// Full-width range of a single data row. `index` is 0-based within the data
/// range; the sheet row accounts for the header.
pub fn row_range(sheet: &str, columns: &[&str], index: usize) -> String {
    let row = index + 2;
    format!("{sheet}!A{row}:{}{row}", column_letter(columns.len() - 1))
}

/// Single-cell range of the shift status column for one data row.
pub fn shift_status_cell(index: usize) -> String {
    let col = SHIFT_COLUMNS
        .iter()
        .position(|c| *c == "status")
        .unwrap_or(2);
    format!("{SHIFTS_SHEET}!{}{}", column_letter(col), index + 2)
}

fn encode_bool(b: bool) -> String {
    if b { "TRUE".into() } else { "FALSE".into() }
}

fn decode_bool(cell: Option<&String>) -> bool {
    cell.map(|s| s == "TRUE").unwrap_or(false)
}

fn cell(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

pub fn encode_volunteer(v: &Volunteer) -> Vec<String> {
    vec![
        v.name.clone(),
        v.phone.clone(),
        v.email.clone(),
        encode_bool(v.monday),
        encode_bool(v.tuesday),
        encode_bool(v.wednesday),
        encode_bool(v.thursday),
        encode_bool(v.friday),
        encode_bool(v.is_manager),
    ]
}

pub fn decode_volunteer(row: &[String]) -> Volunteer {
    Volunteer {
        name: cell(row, 0),
        phone: cell(row, 1),
        email: cell(row, 2),
        monday: decode_bool(row.get(3)),
        tuesday: decode_bool(row.get(4)),
        wednesday: decode_bool(row.get(5)),
        thursday: decode_bool(row.get(6)),
        friday: decode_bool(row.get(7)),
        is_manager: decode_bool(row.get(8)),
    }
}

pub fn encode_shift(date: NaiveDate, email: &str, status: ShiftStatus) -> Vec<String> {
    vec![
        date.format(DATE_FORMAT).to_string(),
        email.to_string(),
        status.to_string(),
        month_year(date),
    ]
}

pub fn encode_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// None for rows whose date cell does not parse (e.g. a row a human mangled
/// in the sheet); callers skip those.
pub fn decode_shift(row: &[String]) -> Option<Shift> {
    let date = NaiveDate::parse_from_str(&cell(row, 0), DATE_FORMAT).ok()?;
    let status = ShiftStatus::parse(&cell(row, 2))?;
    let month = cell(row, 3);
    Some(Shift {
        date,
        volunteer_email: cell(row, 1),
        status,
        month_year: if month.is_empty() { month_year(date) } else { month },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_ranges_skip_header_row() {
        assert_eq!(data_range(VOLUNTEERS_SHEET, VOLUNTEER_COLUMNS), "Volunteers!A2:I");
        assert_eq!(data_range(SHIFTS_SHEET, SHIFT_COLUMNS), "Shifts!A2:D");
        // Data row 0 lives on sheet row 2.
        assert_eq!(row_range(VOLUNTEERS_SHEET, VOLUNTEER_COLUMNS, 0), "Volunteers!A2:I2");
        assert_eq!(row_range(SHIFTS_SHEET, SHIFT_COLUMNS, 3), "Shifts!A5:D5");
        assert_eq!(shift_status_cell(0), "Shifts!C2");
    }

    #[test]
    fn test_volunteer_encode_width_matches_schema() {
        let v = Volunteer {
            name: "Dana".into(),
            phone: "054".into(),
            email: "dana@x".into(),
            monday: true,
            tuesday: false,
            wednesday: true,
            thursday: false,
            friday: true,
            is_manager: true,
        };
        let row = encode_volunteer(&v);
        assert_eq!(row.len(), VOLUNTEER_COLUMNS.len());
        assert_eq!(row[2], "dana@x");
        assert_eq!(row[8], "TRUE");
        assert_eq!(decode_volunteer(&row), v);
    }

    #[test]
    fn test_decode_volunteer_tolerates_short_rows() {
        let v = decode_volunteer(&["Dana".into(), "".into(), "dana@x".into()]);
        assert_eq!(v.email, "dana@x");
        assert!(!v.is_manager);
    }

    #[test]
    fn test_shift_encode_decode() {
        let row = encode_shift(date(2024, 3, 5), "a@x", ShiftStatus::Proposed);
        assert_eq!(row.len(), SHIFT_COLUMNS.len());
        assert_eq!(row, vec!["2024-03-05", "a@x", "proposed", "March 2024"]);

        let s = decode_shift(&row).unwrap();
        assert_eq!(s.date, date(2024, 3, 5));
        assert_eq!(s.status, ShiftStatus::Proposed);
    }

    #[test]
    fn test_decode_shift_skips_mangled_rows() {
        assert!(decode_shift(&["not-a-date".into(), "a@x".into(), "proposed".into()]).is_none());
        assert!(decode_shift(&["2024-03-05".into(), "a@x".into(), "maybe".into()]).is_none());
    }
}
