//! Persistence boundary.
//!
//! Handlers and services only see `Arc<dyn Store>`. Two implementations exist:
//! [`PgStore`] over a `sqlx` PostgreSQL pool and [`MemoryStore`] holding the
//! tables in process. Both return [`AppError`] with identical semantics, so
//! any test written against one holds for the other.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    Event, EventDetails, EventFilter, Location, NewEvent, NewLocation, NewReservation, NewTicket,
    NewUser, Reservation, ReservationDetails, ReservationFilter, Ticket, TicketFilter,
    UpdateEvent, UpdateLocation, UpdateTicket, UpdateUser, User,
};
use crate::utils::error::AppError;
use crate::utils::pagination::Page;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type StoreResult<T> = Result<T, AppError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// # Errors
    ///
    /// `Conflict` if the email is already registered.
    async fn create_user(&self, input: NewUser) -> StoreResult<User>;
    async fn list_users(&self, page: Page) -> StoreResult<Vec<User>>;
    async fn get_user(&self, id: Uuid) -> StoreResult<User>;
    async fn update_user(&self, id: Uuid, input: UpdateUser) -> StoreResult<User>;
    /// # Errors
    ///
    /// `Conflict` while the user organizes events or holds reservations.
    async fn delete_user(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn create_location(&self, input: NewLocation) -> StoreResult<Location>;
    async fn list_locations(&self, page: Page) -> StoreResult<Vec<Location>>;
    async fn get_location(&self, id: Uuid) -> StoreResult<Location>;
    async fn update_location(&self, id: Uuid, input: UpdateLocation) -> StoreResult<Location>;
    /// # Errors
    ///
    /// `Conflict` while any event is hosted at the location.
    async fn delete_location(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// # Errors
    ///
    /// `NotFound` if the organizer or the location does not exist.
    async fn create_event(&self, input: NewEvent) -> StoreResult<Event>;
    async fn list_events(&self, filter: EventFilter, page: Page) -> StoreResult<Vec<Event>>;
    async fn get_event(&self, id: Uuid) -> StoreResult<EventDetails>;
    async fn update_event(&self, id: Uuid, input: UpdateEvent) -> StoreResult<Event>;
    /// Deletes the event and its tickets.
    ///
    /// # Errors
    ///
    /// `Conflict` while any reservation references the event.
    async fn delete_event(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Issues `input.quantity` units, all of them available.
    async fn create_ticket(&self, input: NewTicket) -> StoreResult<Ticket>;
    async fn list_tickets(&self, filter: TicketFilter, page: Page) -> StoreResult<Vec<Ticket>>;
    async fn get_ticket(&self, id: Uuid) -> StoreResult<Ticket>;
    /// Changing `quantity_total` keeps the reserved amount and rebalances
    /// availability under the same lock reservations take.
    async fn update_ticket(&self, id: Uuid, input: UpdateTicket) -> StoreResult<Ticket>;
    async fn delete_ticket(&self, id: Uuid) -> StoreResult<()>;
}

/// Inventory transitions. Each call is all-or-nothing.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Debits the ticket and records the reservation.
    ///
    /// # Errors
    ///
    /// - `NotFound` for a missing ticket, user or event
    /// - `ValidationError` if the ticket belongs to another event
    /// - `InsufficientInventory` if fewer units are available than requested
    ///
    /// Nothing is written on any error.
    async fn reserve(&self, input: &NewReservation) -> StoreResult<Reservation>;

    /// Credits the ticket back and deletes the reservation. Returns the
    /// removed record.
    async fn cancel(&self, id: Uuid) -> StoreResult<Reservation>;

    async fn list_reservations(
        &self,
        filter: ReservationFilter,
        page: Page,
    ) -> StoreResult<Vec<ReservationDetails>>;

    async fn get_reservation(&self, id: Uuid) -> StoreResult<ReservationDetails>;
}

pub trait Store:
    UserRepository + LocationRepository + EventRepository + TicketRepository + ReservationRepository
{
}

impl<T> Store for T where
    T: UserRepository
        + LocationRepository
        + EventRepository
        + TicketRepository
        + ReservationRepository
{
}
