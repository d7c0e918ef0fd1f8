use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{
    EventRepository, LocationRepository, ReservationRepository, StoreResult, TicketRepository,
    UserRepository,
};
use crate::models::{
    Event, EventDetails, EventFilter, Location, NewEvent, NewLocation, NewReservation, NewTicket,
    NewUser, Reservation, ReservationDetails, ReservationFilter, Ticket, TicketFilter,
    UpdateEvent, UpdateLocation, UpdateTicket, UpdateUser, User,
};
use crate::utils::error::AppError;
use crate::utils::pagination::Page;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    locations: HashMap<Uuid, Location>,
    events: HashMap<Uuid, Event>,
    tickets: HashMap<Uuid, Ticket>,
    reservations: HashMap<Uuid, Reservation>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Tables {
    /// Strictly increasing clock so creation order is total.
    fn now(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now
    }

    fn user(&self, id: Uuid) -> StoreResult<&User> {
        self.users
            .get(&id)
            .ok_or_else(|| AppError::not_found("User", id))
    }

    fn location(&self, id: Uuid) -> StoreResult<&Location> {
        self.locations
            .get(&id)
            .ok_or_else(|| AppError::not_found("Location", id))
    }

    fn event(&self, id: Uuid) -> StoreResult<&Event> {
        self.events
            .get(&id)
            .ok_or_else(|| AppError::not_found("Event", id))
    }

    fn ticket(&self, id: Uuid) -> StoreResult<&Ticket> {
        self.tickets
            .get(&id)
            .ok_or_else(|| AppError::not_found("Ticket", id))
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn details(&self, reservation: &Reservation) -> StoreResult<ReservationDetails> {
        let dangling = || {
            AppError::InternalServerError(format!(
                "Reservation '{}' references a missing record",
                reservation.id
            ))
        };
        Ok(ReservationDetails {
            id: reservation.id,
            quantity: reservation.quantity,
            reserved_at: reservation.reserved_at,
            updated_at: reservation.updated_at,
            user: self.users.get(&reservation.user_id).ok_or_else(dangling)?.clone(),
            event: self.events.get(&reservation.event_id).ok_or_else(dangling)?.clone(),
            ticket: self.tickets.get(&reservation.ticket_id).ok_or_else(dangling)?.clone(),
        })
    }
}

fn ordered<'a, T, I, K>(items: I, key: K) -> Vec<T>
where
    T: Clone + 'a,
    I: Iterator<Item = &'a T>,
    K: Fn(&T) -> (DateTime<Utc>, Uuid),
{
    let mut items: Vec<T> = items.cloned().collect();
    items.sort_by_key(|item| key(item));
    items
}

/// In-process [`Store`](super::Store).
///
/// Every operation runs under one mutex, so inventory transitions are
/// serialized the same way the row lock serializes them in PostgreSQL.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, input: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.lock().await;
        if tables.email_taken(&input.email, None) {
            return Err(AppError::Conflict(format!(
                "Email '{}' is already registered",
                input.email
            )));
        }

        let now = tables.now();
        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            role: input.role,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_users(&self, page: Page) -> StoreResult<Vec<User>> {
        let tables = self.tables.lock().await;
        let users = ordered(tables.users.values(), |u| (u.created_at, u.id));
        Ok(page.slice(users))
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<User> {
        let tables = self.tables.lock().await;
        tables.user(id).cloned()
    }

    async fn update_user(&self, id: Uuid, input: UpdateUser) -> StoreResult<User> {
        let mut tables = self.tables.lock().await;
        tables.user(id)?;
        if let Some(email) = &input.email {
            if tables.email_taken(email, Some(id)) {
                return Err(AppError::Conflict(format!(
                    "Email '{}' is already registered",
                    email
                )));
            }
        }

        let now = tables.now();
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User", id))?;
        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(email) = input.email {
            user.email = email;
        }
        if let Some(role) = input.role {
            user.role = role;
        }
        user.updated_at = now;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        tables.user(id)?;
        let referenced = tables.events.values().any(|e| e.organizer_id == id)
            || tables.reservations.values().any(|r| r.user_id == id);
        if referenced {
            return Err(AppError::Conflict(format!(
                "User '{}' still organizes events or holds reservations",
                id
            )));
        }
        tables.users.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl LocationRepository for MemoryStore {
    async fn create_location(&self, input: NewLocation) -> StoreResult<Location> {
        let mut tables = self.tables.lock().await;
        let now = tables.now();
        let location = Location {
            id: Uuid::new_v4(),
            name: input.name,
            address: input.address,
            capacity: input.capacity,
            created_at: now,
            updated_at: now,
        };
        tables.locations.insert(location.id, location.clone());
        Ok(location)
    }

    async fn list_locations(&self, page: Page) -> StoreResult<Vec<Location>> {
        let tables = self.tables.lock().await;
        let locations = ordered(tables.locations.values(), |l| (l.created_at, l.id));
        Ok(page.slice(locations))
    }

    async fn get_location(&self, id: Uuid) -> StoreResult<Location> {
        let tables = self.tables.lock().await;
        tables.location(id).cloned()
    }

    async fn update_location(&self, id: Uuid, input: UpdateLocation) -> StoreResult<Location> {
        let mut tables = self.tables.lock().await;
        tables.location(id)?;
        let now = tables.now();
        let location = tables
            .locations
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Location", id))?;
        if let Some(name) = input.name {
            location.name = name;
        }
        if let Some(address) = input.address {
            location.address = address;
        }
        if let Some(capacity) = input.capacity {
            location.capacity = capacity;
        }
        location.updated_at = now;
        Ok(location.clone())
    }

    async fn delete_location(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        tables.location(id)?;
        if tables.events.values().any(|e| e.location_id == id) {
            return Err(AppError::Conflict(format!(
                "Location '{}' still hosts events",
                id
            )));
        }
        tables.locations.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn create_event(&self, input: NewEvent) -> StoreResult<Event> {
        let mut tables = self.tables.lock().await;
        tables.user(input.organizer_id)?;
        tables.location(input.location_id)?;

        let now = tables.now();
        let event = Event {
            id: Uuid::new_v4(),
            organizer_id: input.organizer_id,
            location_id: input.location_id,
            title: input.title,
            description: input.description,
            date: input.date,
            time: input.time,
            category: input.category,
            created_at: now,
            updated_at: now,
        };
        tables.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn list_events(&self, filter: EventFilter, page: Page) -> StoreResult<Vec<Event>> {
        let tables = self.tables.lock().await;
        let events = ordered(
            tables.events.values().filter(|e| filter.matches(e)),
            |e| (e.created_at, e.id),
        );
        Ok(page.slice(events))
    }

    async fn get_event(&self, id: Uuid) -> StoreResult<EventDetails> {
        let tables = self.tables.lock().await;
        let event = tables.event(id)?.clone();
        let organizer = tables.user(event.organizer_id)?.clone();
        let location = tables.location(event.location_id)?.clone();
        let tickets = ordered(
            tables.tickets.values().filter(|t| t.event_id == id),
            |t| (t.created_at, t.id),
        );
        Ok(EventDetails {
            event,
            organizer,
            location,
            tickets,
        })
    }

    async fn update_event(&self, id: Uuid, input: UpdateEvent) -> StoreResult<Event> {
        let mut tables = self.tables.lock().await;
        tables.event(id)?;
        if let Some(location_id) = input.location_id {
            tables.location(location_id)?;
        }

        let now = tables.now();
        let event = tables
            .events
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Event", id))?;
        if let Some(location_id) = input.location_id {
            event.location_id = location_id;
        }
        if let Some(title) = input.title {
            event.title = title;
        }
        if let Some(description) = input.description {
            event.description = description;
        }
        if let Some(date) = input.date {
            event.date = date;
        }
        if let Some(time) = input.time {
            event.time = time;
        }
        if let Some(category) = input.category {
            event.category = category;
        }
        event.updated_at = now;
        Ok(event.clone())
    }

    async fn delete_event(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        tables.event(id)?;
        if tables.reservations.values().any(|r| r.event_id == id) {
            return Err(AppError::Conflict(format!(
                "Event '{}' has live reservations",
                id
            )));
        }
        tables.tickets.retain(|_, t| t.event_id != id);
        tables.events.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl TicketRepository for MemoryStore {
    async fn create_ticket(&self, input: NewTicket) -> StoreResult<Ticket> {
        let mut tables = self.tables.lock().await;
        tables.event(input.event_id)?;

        let now = tables.now();
        let ticket = Ticket {
            id: Uuid::new_v4(),
            event_id: input.event_id,
            ticket_type: input.ticket_type,
            price: input.price,
            quantity_total: input.quantity,
            quantity_available: input.quantity,
            created_at: now,
            updated_at: now,
        };
        tables.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn list_tickets(&self, filter: TicketFilter, page: Page) -> StoreResult<Vec<Ticket>> {
        let tables = self.tables.lock().await;
        let tickets = ordered(
            tables
                .tickets
                .values()
                .filter(|t| filter.event_id.map_or(true, |id| t.event_id == id)),
            |t| (t.created_at, t.id),
        );
        Ok(page.slice(tickets))
    }

    async fn get_ticket(&self, id: Uuid) -> StoreResult<Ticket> {
        let tables = self.tables.lock().await;
        tables.ticket(id).cloned()
    }

    async fn update_ticket(&self, id: Uuid, input: UpdateTicket) -> StoreResult<Ticket> {
        let mut tables = self.tables.lock().await;
        let available = match input.quantity_total {
            Some(total) => Some(tables.ticket(id)?.rebalanced_available(total)?),
            None => {
                tables.ticket(id)?;
                None
            }
        };

        let now = tables.now();
        let ticket = tables
            .tickets
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Ticket", id))?;
        if let Some(ticket_type) = input.ticket_type {
            ticket.ticket_type = ticket_type;
        }
        if let Some(price) = input.price {
            ticket.price = price;
        }
        if let (Some(total), Some(available)) = (input.quantity_total, available) {
            ticket.quantity_total = total;
            ticket.quantity_available = available;
        }
        ticket.updated_at = now;
        Ok(ticket.clone())
    }

    async fn delete_ticket(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        tables.ticket(id)?;
        if tables.reservations.values().any(|r| r.ticket_id == id) {
            return Err(AppError::Conflict(format!(
                "Ticket '{}' has live reservations",
                id
            )));
        }
        tables.tickets.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn reserve(&self, input: &NewReservation) -> StoreResult<Reservation> {
        let mut tables = self.tables.lock().await;

        // All checks first; the tables are only touched once they pass.
        let ticket = tables.ticket(input.ticket_id)?;
        tables.user(input.user_id)?;
        tables.event(input.event_id)?;
        input.check_ticket(ticket)?;

        let now = tables.now();
        let ticket = tables
            .tickets
            .get_mut(&input.ticket_id)
            .ok_or_else(|| AppError::not_found("Ticket", input.ticket_id))?;
        ticket.quantity_available -= input.quantity;
        ticket.updated_at = now;

        let reservation = Reservation {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            event_id: input.event_id,
            ticket_id: input.ticket_id,
            quantity: input.quantity,
            reserved_at: now,
            updated_at: now,
        };
        tables.reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn cancel(&self, id: Uuid) -> StoreResult<Reservation> {
        let mut tables = self.tables.lock().await;
        let reservation = tables
            .reservations
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Reservation", id))?;

        let now = tables.now();
        let ticket = tables
            .tickets
            .get_mut(&reservation.ticket_id)
            .ok_or_else(|| AppError::not_found("Ticket", reservation.ticket_id))?;
        ticket.quantity_available += reservation.quantity;
        ticket.updated_at = now;

        tables.reservations.remove(&id);
        Ok(reservation)
    }

    async fn list_reservations(
        &self,
        filter: ReservationFilter,
        page: Page,
    ) -> StoreResult<Vec<ReservationDetails>> {
        let tables = self.tables.lock().await;
        let reservations = ordered(
            tables
                .reservations
                .values()
                .filter(|r| filter.user_id.map_or(true, |id| r.user_id == id)),
            |r| (r.reserved_at, r.id),
        );
        page.slice(reservations)
            .iter()
            .map(|r| tables.details(r))
            .collect()
    }

    async fn get_reservation(&self, id: Uuid) -> StoreResult<ReservationDetails> {
        let tables = self.tables.lock().await;
        let reservation = tables
            .reservations
            .get(&id)
            .ok_or_else(|| AppError::not_found("Reservation", id))?;
        tables.details(reservation)
    }
}
