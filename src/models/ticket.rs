use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{check_optional_text, check_text};
use crate::utils::error::AppError;

const TYPE_MAX: usize = 50;

/// A priced allotment of admissions for one event.
///
/// `quantity_total` is the issued amount; `quantity_available` is what is
/// left after live reservations. `0 <= available <= total` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub event_id: Uuid,
    #[serde(rename = "type")]
    pub ticket_type: String,
    pub price: Decimal,
    pub quantity_total: i32,
    pub quantity_available: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Units currently held by live reservations.
    pub fn quantity_reserved(&self) -> i32 {
        self.quantity_total - self.quantity_available
    }

    /// Availability left after changing the issued quantity to `new_total`.
    pub fn rebalanced_available(&self, new_total: i32) -> Result<i32, AppError> {
        let reserved = self.quantity_reserved();
        if new_total < reserved {
            return Err(AppError::ValidationError(format!(
                "quantityTotal cannot be lower than the {} unit(s) already reserved",
                reserved
            )));
        }
        Ok(new_total - reserved)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub event_id: Uuid,
    #[serde(rename = "type")]
    pub ticket_type: String,
    pub price: Decimal,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicket {
    #[serde(rename = "type")]
    pub ticket_type: Option<String>,
    pub price: Option<Decimal>,
    pub quantity_total: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketFilter {
    pub event_id: Option<Uuid>,
}

fn check_price(price: Decimal) -> Result<(), AppError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::ValidationError(
            "price must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn check_quantity(field: &str, quantity: i32) -> Result<(), AppError> {
    if quantity < 0 {
        return Err(AppError::ValidationError(format!(
            "{} must not be negative",
            field
        )));
    }
    Ok(())
}

impl NewTicket {
    pub fn validate(&self) -> Result<(), AppError> {
        check_text("type", &self.ticket_type, TYPE_MAX)?;
        check_price(self.price)?;
        check_quantity("quantity", self.quantity)
    }
}

impl UpdateTicket {
    pub fn validate(&self) -> Result<(), AppError> {
        check_optional_text("type", self.ticket_type.as_deref(), TYPE_MAX)?;
        if let Some(price) = self.price {
            check_price(price)?;
        }
        if let Some(total) = self.quantity_total {
            check_quantity("quantityTotal", total)?;
        }
        Ok(())
    }
}
