//! Shift lifecycle rules on top of the raw record store.
//!
//! The service owns the guards the raw stores deliberately do not:
//! past-date rejection, last-manager protection, and the duplicate-proposal
//! check. The store instance is injected, never ambient — construct one per
//! process and pass it down.

use chrono::{Local, NaiveDate};
use libroster_core::{Result, RosterError, Shift, ShiftStatus, Volunteer};
use std::sync::Arc;

use crate::RosterStore;

pub struct RosterService {
    store: Arc<dyn RosterStore>,
}

impl RosterService {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RosterStore> {
        &self.store
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Date-only comparison — actions touching an elapsed date fail fast,
    /// before any store round trip.
    fn guard_date(date: NaiveDate) -> Result<()> {
        if date < Self::today() {
            return Err(RosterError::PastDate(date));
        }
        Ok(())
    }

    pub async fn list_volunteers(&self) -> Vec<Volunteer> {
        self.store.list_volunteers().await
    }

    pub async fn add_volunteer(&self, volunteer: Volunteer) -> bool {
        self.store.add_volunteer(volunteer).await
    }

    /// Full-record overwrite keyed by the current email. Refuses to demote
    /// the sole remaining manager.
    pub async fn update_volunteer(&self, email: &str, volunteer: Volunteer) -> Result<bool> {
        let all = self.store.list_volunteers().await;
        let current = all.iter().find(|v| v.email == email);
        if let Some(current) = current
            && current.is_manager
            && !volunteer.is_manager
        {
            let managers = all.iter().filter(|v| v.is_manager).count();
            if managers == 1 {
                tracing::warn!("🛑 Refusing to demote the last manager: {email}");
                return Err(RosterError::InvariantViolation);
            }
        }
        Ok(self.store.update_volunteer(email, volunteer).await)
    }

    pub async fn delete_volunteer(&self, email: &str) -> bool {
        self.store.delete_volunteer(email).await
    }

    pub async fn list_shifts(&self, volunteer_email: Option<&str>) -> Vec<Shift> {
        self.store.list_shifts(volunteer_email).await
    }

    pub async fn find_shift(&self, date: NaiveDate, email: &str) -> Option<Shift> {
        self.store
            .list_shifts(Some(email))
            .await
            .into_iter()
            .find(|s| s.date == date)
    }

    /// Volunteer proposes a date. A `(date, email)` pair that already exists
    /// is an idempotent no-op success — two racing proposals collapse to one
    /// row, and a retry of a proposal that already landed is not a failure.
    pub async fn propose_shift(&self, email: &str, date: NaiveDate) -> Result<bool> {
        Self::guard_date(date)?;
        if self.find_shift(date, email).await.is_some() {
            tracing::info!("↩️ Duplicate proposal ignored: {date} {email}");
            return Ok(true);
        }
        Ok(self.store.propose_shift(email, date).await)
    }

    /// Manager converts a proposal to approved. Update-only: a missing
    /// proposal is a false, not an append.
    pub async fn approve_shift(&self, date: NaiveDate, email: &str) -> Result<bool> {
        Self::guard_date(date)?;
        Ok(self.store.approve_shift(date, email).await)
    }

    /// Manager places a volunteer directly on a date, collapsing
    /// propose+approve into one step. Upsert, idempotent in outcome.
    pub async fn assign_shift(&self, date: NaiveDate, email: &str) -> Result<bool> {
        Self::guard_date(date)?;
        Ok(self.store.assign_shift(date, email).await)
    }

    /// Deletes the shift row outright. No audit trail is kept.
    pub async fn reject_shift(&self, date: NaiveDate, email: &str) -> Result<bool> {
        Self::guard_date(date)?;
        Ok(self.store.reject_shift(date, email).await)
    }

    /// True when this shift exists and is still only proposed — the window
    /// in which the proposer may withdraw it themselves.
    pub async fn is_withdrawable_by(&self, date: NaiveDate, email: &str) -> bool {
        matches!(
            self.find_shift(date, email).await,
            Some(shift) if shift.status == ShiftStatus::Proposed
        )
    }

    pub async fn is_manager(&self, email: &str) -> bool {
        self.store
            .list_volunteers()
            .await
            .iter()
            .any(|v| v.email == email && v.is_manager)
    }

    /// The very first authenticated user bootstraps the system and is
    /// treated as a manager until real records exist.
    pub async fn is_first_user(&self) -> bool {
        self.store.list_volunteers().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use chrono::Duration;

    fn volunteer(email: &str, manager: bool) -> Volunteer {
        Volunteer {
            name: email.split('@').next().unwrap_or("").to_string(),
            phone: String::new(),
            email: email.to_string(),
            monday: false,
            tuesday: false,
            wednesday: false,
            thursday: false,
            friday: false,
            is_manager: manager,
        }
    }

    fn service() -> RosterService {
        RosterService::new(Arc::new(MemoryStore::new()))
    }

    fn tomorrow() -> NaiveDate {
        Local::now().date_naive() + Duration::days(1)
    }

    fn yesterday() -> NaiveDate {
        Local::now().date_naive() - Duration::days(1)
    }

    #[tokio::test]
    async fn test_past_date_propose_rejected_before_store() {
        let svc = service();
        let err = svc.propose_shift("a@x", yesterday()).await.unwrap_err();
        assert!(matches!(err, RosterError::PastDate(_)));
        assert!(svc.list_shifts(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_past_date_guard_covers_all_mutations() {
        let svc = service();
        assert!(svc.approve_shift(yesterday(), "a@x").await.is_err());
        assert!(svc.assign_shift(yesterday(), "a@x").await.is_err());
        assert!(svc.reject_shift(yesterday(), "a@x").await.is_err());
    }

    #[tokio::test]
    async fn test_today_is_not_a_past_date() {
        let svc = service();
        let today = Local::now().date_naive();
        assert!(svc.propose_shift("a@x", today).await.unwrap());
    }

    #[tokio::test]
    async fn test_demoting_sole_manager_fails_and_store_unchanged() {
        let svc = service();
        svc.add_volunteer(volunteer("boss@x", true)).await;
        svc.add_volunteer(volunteer("helper@x", false)).await;

        let err = svc
            .update_volunteer("boss@x", volunteer("boss@x", false))
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::InvariantViolation));

        let all = svc.list_volunteers().await;
        let boss = all.iter().find(|v| v.email == "boss@x").unwrap();
        assert!(boss.is_manager);
    }

    #[tokio::test]
    async fn test_demotion_allowed_when_another_manager_exists() {
        let svc = service();
        svc.add_volunteer(volunteer("boss@x", true)).await;
        svc.add_volunteer(volunteer("deputy@x", true)).await;

        assert!(svc
            .update_volunteer("boss@x", volunteer("boss@x", false))
            .await
            .unwrap());
        assert!(svc.is_manager("deputy@x").await);
        assert!(!svc.is_manager("boss@x").await);
    }

    #[tokio::test]
    async fn test_non_manager_update_skips_invariant() {
        let svc = service();
        svc.add_volunteer(volunteer("boss@x", true)).await;
        svc.add_volunteer(volunteer("helper@x", false)).await;

        let mut renamed = volunteer("helper@x", false);
        renamed.name = "Helper Renamed".into();
        assert!(svc.update_volunteer("helper@x", renamed).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_proposal_collapses_to_one_row() {
        let svc = service();
        let d = tomorrow();
        assert!(svc.propose_shift("a@x", d).await.unwrap());
        // The retry succeeds too; only one row exists.
        assert!(svc.propose_shift("a@x", d).await.unwrap());
        assert_eq!(svc.list_shifts(None).await.len(), 1);
    }

    #[tokio::test]
    async fn test_assign_twice_leaves_one_approved_row() {
        let svc = service();
        let d = tomorrow();
        assert!(svc.assign_shift(d, "a@x").await.unwrap());
        assert!(svc.assign_shift(d, "a@x").await.unwrap());

        let shifts = svc.list_shifts(None).await;
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].status, ShiftStatus::Approved);
    }

    #[tokio::test]
    async fn test_proposed_shift_is_withdrawable_until_approved() {
        let svc = service();
        let d = tomorrow();
        svc.propose_shift("a@x", d).await.unwrap();
        assert!(svc.is_withdrawable_by(d, "a@x").await);

        svc.approve_shift(d, "a@x").await.unwrap();
        assert!(!svc.is_withdrawable_by(d, "a@x").await);
    }

    #[tokio::test]
    async fn test_first_user_bootstraps_as_manager() {
        let svc = service();
        assert!(svc.is_first_user().await);
        svc.add_volunteer(volunteer("boss@x", true)).await;
        assert!(!svc.is_first_user().await);
        assert!(svc.is_manager("boss@x").await);
        assert!(!svc.is_manager("stranger@x").await);
    }
}
