//! Google Sheets backend — row CRUD over the spreadsheet values API.
//!
//! All lookup is a linear scan by key equality over the fetched rows; the
//! tables are tens to low hundreds of rows, so no index structure is kept.
//! Backend failures are logged here and degrade to empty/false returns so a
//! request never surfaces a raw transport error.

use async_trait::async_trait;
use chrono::NaiveDate;
use libroster_core::config::SheetsConfig;
use libroster_core::{Shift, ShiftStatus, Volunteer};
use serde::Deserialize;

use crate::schema::{
    self, SHIFT_COLUMNS, SHIFTS_SHEET, VOLUNTEER_COLUMNS, VOLUNTEERS_SHEET,
};
use crate::RosterStore;

pub struct SheetsStore {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    api_token: String,
}

/// Wire shape of a `values` API response.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsStore {
    pub fn new(config: &SheetsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            api_token: config.api_token.clone(),
        }
    }

    fn url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{}/{}/values/{range}{suffix}",
            self.base_url, self.spreadsheet_id
        )
    }

    async fn values_get(&self, range: &str) -> Option<Vec<Vec<String>>> {
        let result = self
            .client
            .get(self.url(range, ""))
            .bearer_auth(&self.api_token)
            .send()
            .await
            .and_then(|r| r.error_for_status());
        match result {
            Ok(response) => match response.json::<ValueRange>().await {
                Ok(body) => Some(body.values),
                Err(e) => {
                    tracing::warn!("⚠️ Sheets get {range}: bad response body: {e}");
                    None
                }
            },
            Err(e) => {
                tracing::warn!("⚠️ Sheets get {range}: {e}");
                None
            }
        }
    }

    async fn values_append(&self, range: &str, row: Vec<String>) -> bool {
        let result = self
            .client
            .post(self.url(range, ":append"))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.api_token)
            .json(&serde_json::json!({ "values": [row] }))
            .send()
            .await
            .and_then(|r| r.error_for_status());
        if let Err(e) = result {
            tracing::warn!("⚠️ Sheets append {range}: {e}");
            return false;
        }
        true
    }

    async fn values_update(&self, range: &str, rows: Vec<Vec<String>>) -> bool {
        let result = self
            .client
            .put(self.url(range, ""))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.api_token)
            .json(&serde_json::json!({ "values": rows }))
            .send()
            .await
            .and_then(|r| r.error_for_status());
        if let Err(e) = result {
            tracing::warn!("⚠️ Sheets update {range}: {e}");
            return false;
        }
        true
    }

    async fn values_clear(&self, range: &str) -> bool {
        let result = self
            .client
            .post(self.url(range, ":clear"))
            .bearer_auth(&self.api_token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .and_then(|r| r.error_for_status());
        if let Err(e) = result {
            tracing::warn!("⚠️ Sheets clear {range}: {e}");
            return false;
        }
        true
    }

    /// 0-based data index of the volunteer row with this email.
    async fn find_volunteer_index(&self, email: &str) -> Option<usize> {
        let email_col = VOLUNTEER_COLUMNS.iter().position(|c| *c == "email")?;
        let rows = self
            .values_get(&schema::data_range(VOLUNTEERS_SHEET, VOLUNTEER_COLUMNS))
            .await?;
        rows.iter()
            .position(|row| row.get(email_col).map(String::as_str) == Some(email))
    }

    /// 0-based data index of the shift row with this `(date, email)` key.
    async fn find_shift_index(&self, date: NaiveDate, email: &str) -> Option<usize> {
        let date_cell = schema::encode_date(date);
        let rows = self
            .values_get(&schema::data_range(SHIFTS_SHEET, SHIFT_COLUMNS))
            .await?;
        rows.iter().position(|row| {
            row.first().map(String::as_str) == Some(date_cell.as_str())
                && row.get(1).map(String::as_str) == Some(email)
        })
    }
}

#[async_trait]
impl RosterStore for SheetsStore {
    async fn list_volunteers(&self) -> Vec<Volunteer> {
        let Some(rows) = self
            .values_get(&schema::data_range(VOLUNTEERS_SHEET, VOLUNTEER_COLUMNS))
            .await
        else {
            return Vec::new();
        };
        rows.iter()
            .map(|row| schema::decode_volunteer(row))
            .filter(|v| !v.email.is_empty())
            .collect()
    }

    async fn add_volunteer(&self, volunteer: Volunteer) -> bool {
        self.values_append(
            &schema::data_range(VOLUNTEERS_SHEET, VOLUNTEER_COLUMNS),
            schema::encode_volunteer(&volunteer),
        )
        .await
    }

    async fn update_volunteer(&self, email: &str, volunteer: Volunteer) -> bool {
        let Some(index) = self.find_volunteer_index(email).await else {
            return false;
        };
        self.values_update(
            &schema::row_range(VOLUNTEERS_SHEET, VOLUNTEER_COLUMNS, index),
            vec![schema::encode_volunteer(&volunteer)],
        )
        .await
    }

    async fn delete_volunteer(&self, email: &str) -> bool {
        let Some(index) = self.find_volunteer_index(email).await else {
            return false;
        };
        self.values_clear(&schema::row_range(VOLUNTEERS_SHEET, VOLUNTEER_COLUMNS, index))
            .await
    }

    async fn list_shifts(&self, volunteer_email: Option<&str>) -> Vec<Shift> {
        let Some(rows) = self
            .values_get(&schema::data_range(SHIFTS_SHEET, SHIFT_COLUMNS))
            .await
        else {
            return Vec::new();
        };
        rows.iter()
            .filter_map(|row| schema::decode_shift(row))
            .filter(|s| match volunteer_email {
                Some(email) => s.volunteer_email == email,
                None => true,
            })
            .collect()
    }

    async fn propose_shift(&self, email: &str, date: NaiveDate) -> bool {
        self.values_append(
            &schema::data_range(SHIFTS_SHEET, SHIFT_COLUMNS),
            schema::encode_shift(date, email, ShiftStatus::Proposed),
        )
        .await
    }

    async fn approve_shift(&self, date: NaiveDate, email: &str) -> bool {
        let Some(index) = self.find_shift_index(date, email).await else {
            return false;
        };
        self.values_update(
            &schema::shift_status_cell(index),
            vec![vec![ShiftStatus::Approved.to_string()]],
        )
        .await
    }

    async fn assign_shift(&self, date: NaiveDate, email: &str) -> bool {
        match self.find_shift_index(date, email).await {
            Some(index) => {
                self.values_update(
                    &schema::shift_status_cell(index),
                    vec![vec![ShiftStatus::Approved.to_string()]],
                )
                .await
            }
            None => {
                self.values_append(
                    &schema::data_range(SHIFTS_SHEET, SHIFT_COLUMNS),
                    schema::encode_shift(date, email, ShiftStatus::Approved),
                )
                .await
            }
        }
    }

    async fn reject_shift(&self, date: NaiveDate, email: &str) -> bool {
        let Some(index) = self.find_shift_index(date, email).await else {
            return false;
        };
        self.values_clear(&schema::row_range(SHIFTS_SHEET, SHIFT_COLUMNS, index))
            .await
    }
}
