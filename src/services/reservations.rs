use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{NewReservation, Reservation, ReservationDetails, ReservationFilter};
use crate::store::Store;
use crate::utils::error::AppError;
use crate::utils::pagination::Page;

/// Every change to ticket inventory goes through here.
#[derive(Clone)]
pub struct ReservationService {
    store: Arc<dyn Store>,
}

impl ReservationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Reserves `input.quantity` units of a ticket for a user.
    ///
    /// The availability check, the debit and the insert commit together or
    /// not at all.
    #[tracing::instrument(
        skip(self, input),
        fields(
            user_id = %input.user_id,
            ticket_id = %input.ticket_id,
            quantity = input.quantity
        )
    )]
    pub async fn create_reservation(&self, input: NewReservation) -> Result<Reservation, AppError> {
        input.validate()?;

        match self.store.reserve(&input).await {
            Ok(reservation) => {
                info!(reservation_id = %reservation.id, "Reservation created");
                Ok(reservation)
            }
            Err(err @ AppError::InsufficientInventory(_)) => {
                warn!("Reservation rejected: not enough tickets available");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Releases the reserved units back to the ticket and removes the record.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_reservation(&self, id: Uuid) -> Result<Reservation, AppError> {
        let reservation = self.store.cancel(id).await?;
        info!(
            ticket_id = %reservation.ticket_id,
            quantity = reservation.quantity,
            "Reservation cancelled"
        );
        Ok(reservation)
    }

    pub async fn get_reservations(
        &self,
        user_id: Option<Uuid>,
        page: Page,
    ) -> Result<Vec<ReservationDetails>, AppError> {
        self.store
            .list_reservations(ReservationFilter { user_id }, page)
            .await
    }

    pub async fn get_reservation_by_id(&self, id: Uuid) -> Result<ReservationDetails, AppError> {
        self.store.get_reservation(id).await
    }
}
