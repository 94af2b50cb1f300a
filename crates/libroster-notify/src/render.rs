//! Plain-text rendering for digest and invite emails. Layout and styling
//! live with the mail client; we only produce subject + body.

use libroster_core::Shift;

fn shift_line(shift: &Shift) -> String {
    format!("  - {}", shift.date.format("%A, %-d %B %Y"))
}

/// Weekly reminder for one volunteer: the approved shifts in the upcoming
/// Sun–Sat week.
pub fn weekly_reminder(name: &str, shifts: &[Shift]) -> (String, String) {
    let subject = "Your library shifts next week".to_string();
    let mut body = format!("Hi {name},\n\nYou are scheduled for these shifts next week:\n\n");
    for shift in shifts {
        body.push_str(&shift_line(shift));
        body.push('\n');
    }
    body.push_str("\nSee you at the library!\n");
    (subject, body)
}

/// Monthly schedule for one volunteer. `month_label` is the display label of
/// the month being announced ("April 2024").
pub fn monthly_schedule(name: &str, month_label: &str, shifts: &[Shift]) -> (String, String) {
    let subject = format!("Library schedule for {month_label}");
    let mut body = format!("Hi {name},\n\nYour approved shifts for {month_label}:\n\n");
    for shift in shifts {
        body.push_str(&shift_line(shift));
        body.push('\n');
    }
    body.push_str("\nReply to the roster manager if a date no longer works.\n");
    (subject, body)
}

/// Invitation for a newly added volunteer.
pub fn invite(volunteer_name: Option<&str>) -> (String, String) {
    let subject = "Welcome to the library volunteer roster".to_string();
    let greeting = match volunteer_name {
        Some(name) if !name.is_empty() => format!("Hi {name},"),
        _ => "Hi,".to_string(),
    };
    let body = format!(
        "{greeting}\n\nYou have been added to the library volunteer roster.\n\
         Sign in with this email address to propose shifts and see your schedule.\n"
    );
    (subject, body)
}
