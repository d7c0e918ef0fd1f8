use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Event, Ticket, User};
use crate::utils::error::AppError;

/// A commitment of `quantity` units of one ticket to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub ticket_id: Uuid,
    pub quantity: i32,
    pub reserved_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetails {
    pub id: Uuid,
    pub quantity: i32,
    pub reserved_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: User,
    pub event: Event,
    pub ticket: Ticket,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub ticket_id: Uuid,
    pub quantity: i32,
}

impl NewReservation {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.quantity <= 0 {
            return Err(AppError::ValidationError(
                "quantity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks the requested ticket against the rest of the request.
    ///
    /// Runs against the locked ticket row, before anything is written.
    pub fn check_ticket(&self, ticket: &Ticket) -> Result<(), AppError> {
        if ticket.event_id != self.event_id {
            return Err(AppError::ValidationError(format!(
                "Ticket '{}' does not belong to event '{}'",
                ticket.id, self.event_id
            )));
        }
        if ticket.quantity_available < self.quantity {
            return Err(AppError::InsufficientInventory(format!(
                "Requested {} unit(s) of ticket '{}' but only {} available",
                self.quantity, ticket.id, ticket.quantity_available
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFilter {
    pub user_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn request(event_id: Uuid, quantity: i32) -> NewReservation {
        NewReservation {
            user_id: Uuid::new_v4(),
            event_id,
            ticket_id: Uuid::new_v4(),
            quantity,
        }
    }

    fn ticket(event_id: Uuid, available: i32) -> Ticket {
        let now = Utc::now();
        Ticket {
            id: Uuid::new_v4(),
            event_id,
            ticket_type: "General".into(),
            price: Decimal::new(5000, 2),
            quantity_total: 5,
            quantity_available: available,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let event_id = Uuid::new_v4();
        assert!(request(event_id, 1).validate().is_ok());
        assert!(request(event_id, 0).validate().is_err());
        assert!(request(event_id, -2).validate().is_err());
    }

    #[test]
    fn test_check_ticket_inventory() {
        let event_id = Uuid::new_v4();
        let t = ticket(event_id, 2);

        assert!(request(event_id, 2).check_ticket(&t).is_ok());
        assert!(matches!(
            request(event_id, 3).check_ticket(&t),
            Err(AppError::InsufficientInventory(_))
        ));
    }

    #[test]
    fn test_check_ticket_event_mismatch() {
        let t = ticket(Uuid::new_v4(), 5);
        assert!(matches!(
            request(Uuid::new_v4(), 1).check_ticket(&t),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_request_uses_camel_case() {
        let body = serde_json::json!({
            "userId": Uuid::new_v4(),
            "eventId": Uuid::new_v4(),
            "ticketId": Uuid::new_v4(),
            "quantity": 3
        });
        let input: NewReservation = serde_json::from_value(body).unwrap();
        assert_eq!(input.quantity, 3);
    }
}
