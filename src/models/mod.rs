pub mod event;
pub mod location;
pub mod reservation;
pub mod ticket;
pub mod user;

pub use event::{Event, EventDetails, EventFilter, NewEvent, UpdateEvent};
pub use location::{Location, NewLocation, UpdateLocation};
pub use reservation::{NewReservation, Reservation, ReservationDetails, ReservationFilter};
pub use ticket::{NewTicket, Ticket, TicketFilter, UpdateTicket};
pub use user::{NewUser, UpdateUser, User, UserRole};

use crate::utils::error::AppError;

/// Rejects blank strings and strings longer than `max` characters.
pub(crate) fn check_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!(
            "{} must not be empty",
            field
        )));
    }
    if value.chars().count() > max {
        return Err(AppError::ValidationError(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

pub(crate) fn check_optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<(), AppError> {
    match value {
        Some(value) => check_text(field, value, max),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_text() {
        assert!(check_text("name", "Ana", 10).is_ok());
        assert!(check_text("name", "   ", 10).is_err());
        assert!(check_text("name", "abcdefghijk", 10).is_err());
        // counts characters, not bytes
        assert!(check_text("name", "ááááá", 5).is_ok());
    }
}
