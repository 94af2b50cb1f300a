//! In-memory store — the development fallback when no spreadsheet is
//! configured, and the test double for everything above the adapter.
//! Must match the sheets-backed path operation-for-operation.

use async_trait::async_trait;
use chrono::NaiveDate;
use libroster_core::{Shift, ShiftStatus, Volunteer};
use std::sync::Mutex;

use crate::RosterStore;

#[derive(Default)]
pub struct MemoryStore {
    volunteers: Mutex<Vec<Volunteer>>,
    shifts: Mutex<Vec<Shift>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RosterStore for MemoryStore {
    async fn list_volunteers(&self) -> Vec<Volunteer> {
        let volunteers = self.volunteers.lock().unwrap();
        volunteers
            .iter()
            .filter(|v| !v.email.is_empty())
            .cloned()
            .collect()
    }

    async fn add_volunteer(&self, volunteer: Volunteer) -> bool {
        self.volunteers.lock().unwrap().push(volunteer);
        true
    }

    async fn update_volunteer(&self, email: &str, volunteer: Volunteer) -> bool {
        let mut volunteers = self.volunteers.lock().unwrap();
        match volunteers.iter_mut().find(|v| v.email == email) {
            Some(slot) => {
                *slot = volunteer;
                true
            }
            None => false,
        }
    }

    async fn delete_volunteer(&self, email: &str) -> bool {
        let mut volunteers = self.volunteers.lock().unwrap();
        match volunteers.iter().position(|v| v.email == email) {
            Some(index) => {
                volunteers.remove(index);
                true
            }
            None => false,
        }
    }

    async fn list_shifts(&self, volunteer_email: Option<&str>) -> Vec<Shift> {
        let shifts = self.shifts.lock().unwrap();
        match volunteer_email {
            Some(email) => shifts
                .iter()
                .filter(|s| s.volunteer_email == email)
                .cloned()
                .collect(),
            None => shifts.clone(),
        }
    }

    async fn propose_shift(&self, email: &str, date: NaiveDate) -> bool {
        self.shifts
            .lock()
            .unwrap()
            .push(Shift::new(date, email, ShiftStatus::Proposed));
        true
    }

    async fn approve_shift(&self, date: NaiveDate, email: &str) -> bool {
        let mut shifts = self.shifts.lock().unwrap();
        match shifts
            .iter_mut()
            .find(|s| s.date == date && s.volunteer_email == email)
        {
            Some(shift) => {
                shift.status = ShiftStatus::Approved;
                true
            }
            None => false,
        }
    }

    async fn assign_shift(&self, date: NaiveDate, email: &str) -> bool {
        let mut shifts = self.shifts.lock().unwrap();
        match shifts
            .iter_mut()
            .find(|s| s.date == date && s.volunteer_email == email)
        {
            Some(shift) => shift.status = ShiftStatus::Approved,
            None => shifts.push(Shift::new(date, email, ShiftStatus::Approved)),
        }
        true
    }

    async fn reject_shift(&self, date: NaiveDate, email: &str) -> bool {
        let mut shifts = self.shifts.lock().unwrap();
        match shifts
            .iter()
            .position(|s| s.date == date && s.volunteer_email == email)
        {
            Some(index) => {
                shifts.remove(index);
                true
            }
            None => false,
        }
    }
}
