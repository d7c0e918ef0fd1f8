use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{check_optional_text, check_text, Location, Ticket, User};
use crate::utils::error::AppError;

const TITLE_MAX: usize = 150;
const CATEGORY_MAX: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub location_id: Uuid,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "event_date")]
    pub date: NaiveDate,
    #[sqlx(rename = "event_time")]
    pub time: NaiveTime,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An event together with the records it references.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[serde(flatten)]
    pub event: Event,
    pub organizer: User,
    pub location: Location,
    pub tickets: Vec<Ticket>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub organizer_id: Uuid,
    pub location_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub category: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    pub location_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub category: Option<String>,
}

/// Query filters for `GET /events`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub location_id: Option<Uuid>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        if self.date.is_some_and(|date| date != event.date) {
            return false;
        }
        if self.location_id.is_some_and(|id| id != event.location_id) {
            return false;
        }
        match &self.category {
            Some(category) => event
                .category
                .to_lowercase()
                .contains(&category.to_lowercase()),
            None => true,
        }
    }
}

impl NewEvent {
    pub fn validate(&self) -> Result<(), AppError> {
        check_text("title", &self.title, TITLE_MAX)?;
        check_text("category", &self.category, CATEGORY_MAX)
    }
}

impl UpdateEvent {
    pub fn validate(&self) -> Result<(), AppError> {
        check_optional_text("title", self.title.as_deref(), TITLE_MAX)?;
        check_optional_text("category", self.category.as_deref(), CATEGORY_MAX)
    }
}
