use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{check_optional_text, check_text};
use crate::utils::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    pub name: String,
    pub address: String,
    pub capacity: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub address: Option<String>,
    pub capacity: Option<i32>,
}

fn check_capacity(capacity: i32) -> Result<(), AppError> {
    if capacity <= 0 {
        return Err(AppError::ValidationError(
            "capacity must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

impl NewLocation {
    pub fn validate(&self) -> Result<(), AppError> {
        check_text("name", &self.name, 100)?;
        check_text("address", &self.address, 200)?;
        check_capacity(self.capacity)
    }
}

impl UpdateLocation {
    pub fn validate(&self) -> Result<(), AppError> {
        check_optional_text("name", self.name.as_deref(), 100)?;
        check_optional_text("address", self.address.as_deref(), 200)?;
        self.capacity.map_or(Ok(()), check_capacity)
    }
}
