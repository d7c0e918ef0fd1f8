use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgConnection, PgPool, PgPoolOptions};
use sqlx::FromRow;
use uuid::Uuid;

use super::{
    EventRepository, LocationRepository, ReservationRepository, StoreResult, TicketRepository,
    UserRepository,
};
use crate::models::{
    Event, EventDetails, EventFilter, Location, NewEvent, NewLocation, NewReservation, NewTicket,
    NewUser, Reservation, ReservationDetails, ReservationFilter, Ticket, TicketFilter,
    UpdateEvent, UpdateLocation, UpdateTicket, UpdateUser, User, UserRole,
};
use crate::utils::error::AppError;
use crate::utils::pagination::Page;

pub static MIGRATOR: Migrator = sqlx::migrate!();

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

const USER_COLUMNS: &str = "id, name, email, role, created_at, updated_at";
const LOCATION_COLUMNS: &str = "id, name, address, capacity, created_at, updated_at";
const EVENT_COLUMNS: &str = "id, organizer_id, location_id, title, description, \
     event_date, event_time, category, created_at, updated_at";
const TICKET_COLUMNS: &str = "id, event_id, ticket_type, price, quantity_total, \
     quantity_available, created_at, updated_at";
const RESERVATION_COLUMNS: &str =
    "id, user_id, event_id, ticket_id, quantity, reserved_at, updated_at";

const RESERVATION_DETAILS_SELECT: &str = r#"
    SELECT r.id, r.quantity, r.reserved_at, r.updated_at,
           u.id AS user_id, u.name AS user_name, u.email AS user_email, u.role AS user_role,
           u.created_at AS user_created_at, u.updated_at AS user_updated_at,
           e.id AS event_id, e.organizer_id AS event_organizer_id,
           e.location_id AS event_location_id, e.title AS event_title,
           e.description AS event_description, e.event_date, e.event_time,
           e.category AS event_category, e.created_at AS event_created_at,
           e.updated_at AS event_updated_at,
           t.id AS ticket_id, t.event_id AS ticket_event_id, t.ticket_type,
           t.price AS ticket_price, t.quantity_total AS ticket_quantity_total,
           t.quantity_available AS ticket_quantity_available,
           t.created_at AS ticket_created_at, t.updated_at AS ticket_updated_at
    FROM reservations r
    JOIN users u ON u.id = r.user_id
    JOIN events e ON e.id = r.event_id
    JOIN tickets t ON t.id = r.ticket_id
"#;

/// Flat projection of [`RESERVATION_DETAILS_SELECT`].
#[derive(FromRow)]
struct ReservationRow {
    id: Uuid,
    quantity: i32,
    reserved_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_id: Uuid,
    user_name: String,
    user_email: String,
    user_role: UserRole,
    user_created_at: DateTime<Utc>,
    user_updated_at: DateTime<Utc>,
    event_id: Uuid,
    event_organizer_id: Uuid,
    event_location_id: Uuid,
    event_title: String,
    event_description: String,
    event_date: NaiveDate,
    event_time: NaiveTime,
    event_category: String,
    event_created_at: DateTime<Utc>,
    event_updated_at: DateTime<Utc>,
    ticket_id: Uuid,
    ticket_event_id: Uuid,
    ticket_type: String,
    ticket_price: Decimal,
    ticket_quantity_total: i32,
    ticket_quantity_available: i32,
    ticket_created_at: DateTime<Utc>,
    ticket_updated_at: DateTime<Utc>,
}

impl From<ReservationRow> for ReservationDetails {
    fn from(row: ReservationRow) -> Self {
        ReservationDetails {
            id: row.id,
            quantity: row.quantity,
            reserved_at: row.reserved_at,
            updated_at: row.updated_at,
            user: User {
                id: row.user_id,
                name: row.user_name,
                email: row.user_email,
                role: row.user_role,
                created_at: row.user_created_at,
                updated_at: row.user_updated_at,
            },
            event: Event {
                id: row.event_id,
                organizer_id: row.event_organizer_id,
                location_id: row.event_location_id,
                title: row.event_title,
                description: row.event_description,
                date: row.event_date,
                time: row.event_time,
                category: row.event_category,
                created_at: row.event_created_at,
                updated_at: row.event_updated_at,
            },
            ticket: Ticket {
                id: row.ticket_id,
                event_id: row.ticket_event_id,
                ticket_type: row.ticket_type,
                price: row.ticket_price,
                quantity_total: row.ticket_quantity_total,
                quantity_available: row.ticket_quantity_available,
                created_at: row.ticket_created_at,
                updated_at: row.ticket_updated_at,
            },
        }
    }
}

/// Maps constraint violations to a client-facing conflict.
fn constraint_error(err: sqlx::Error, conflict: impl FnOnce() -> String) -> AppError {
    let code = err
        .as_database_error()
        .and_then(|db| db.code().map(|c| c.into_owned()));
    match code.as_deref() {
        Some(UNIQUE_VIOLATION) | Some(FOREIGN_KEY_VIOLATION) => AppError::Conflict(conflict()),
        _ => AppError::DatabaseError(err),
    }
}

/// Escapes LIKE wildcards so the filter is a plain substring match.
fn like_pattern(raw: &str) -> String {
    let escaped = raw
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Takes a `FOR KEY SHARE` lock on the row so it cannot be deleted before
/// the transaction commits. Returns whether the row exists.
async fn lock_key(conn: &mut PgConnection, table: &str, id: Uuid) -> Result<bool, sqlx::Error> {
    let sql = format!("SELECT id FROM {} WHERE id = $1 FOR KEY SHARE", table);
    let found: Option<Uuid> = sqlx::query_scalar(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

async fn require(
    conn: &mut PgConnection,
    table: &str,
    resource: &str,
    id: Uuid,
) -> StoreResult<()> {
    if lock_key(conn, table, id).await? {
        Ok(())
    } else {
        Err(AppError::not_found(resource, id))
    }
}

/// PostgreSQL [`Store`](super::Store) over a shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), MigrateError> {
        MIGRATOR.run(&self.pool).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn create_user(&self, input: NewUser) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users (id, name, email, role) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.role)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                constraint_error(e, || {
                    format!("Email '{}' is already registered", input.email)
                })
            })
    }

    async fn list_users(&self, page: Page) -> StoreResult<Vec<User>> {
        let sql = format!(
            "SELECT {} FROM users ORDER BY created_at, id LIMIT $1 OFFSET $2",
            USER_COLUMNS
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<User> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("User", id))
    }

    async fn update_user(&self, id: Uuid, input: UpdateUser) -> StoreResult<User> {
        let sql = format!(
            "UPDATE users SET name = COALESCE($2, name), email = COALESCE($3, email), \
             role = COALESCE($4, role), updated_at = NOW() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        let email = input.email.clone().unwrap_or_default();
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(input.name)
            .bind(input.email)
            .bind(input.role)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| constraint_error(e, || format!("Email '{}' is already registered", email)))?
            .ok_or_else(|| AppError::not_found("User", id))
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                constraint_error(e, || {
                    format!("User '{}' still organizes events or holds reservations", id)
                })
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User", id));
        }
        Ok(())
    }
}

#[async_trait]
impl LocationRepository for PgStore {
    async fn create_location(&self, input: NewLocation) -> StoreResult<Location> {
        let sql = format!(
            "INSERT INTO locations (id, name, address, capacity) VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            LOCATION_COLUMNS
        );
        Ok(sqlx::query_as::<_, Location>(&sql)
            .bind(Uuid::new_v4())
            .bind(input.name)
            .bind(input.address)
            .bind(input.capacity)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn list_locations(&self, page: Page) -> StoreResult<Vec<Location>> {
        let sql = format!(
            "SELECT {} FROM locations ORDER BY created_at, id LIMIT $1 OFFSET $2",
            LOCATION_COLUMNS
        );
        Ok(sqlx::query_as::<_, Location>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_location(&self, id: Uuid) -> StoreResult<Location> {
        let sql = format!("SELECT {} FROM locations WHERE id = $1", LOCATION_COLUMNS);
        sqlx::query_as::<_, Location>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Location", id))
    }

    async fn update_location(&self, id: Uuid, input: UpdateLocation) -> StoreResult<Location> {
        let sql = format!(
            "UPDATE locations SET name = COALESCE($2, name), address = COALESCE($3, address), \
             capacity = COALESCE($4, capacity), updated_at = NOW() WHERE id = $1 RETURNING {}",
            LOCATION_COLUMNS
        );
        sqlx::query_as::<_, Location>(&sql)
            .bind(id)
            .bind(input.name)
            .bind(input.address)
            .bind(input.capacity)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Location", id))
    }

    async fn delete_location(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| constraint_error(e, || format!("Location '{}' still hosts events", id)))?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Location", id));
        }
        Ok(())
    }
}

#[async_trait]
impl EventRepository for PgStore {
    async fn create_event(&self, input: NewEvent) -> StoreResult<Event> {
        let mut tx = self.pool.begin().await?;
        require(&mut tx, "users", "User", input.organizer_id).await?;
        require(&mut tx, "locations", "Location", input.location_id).await?;

        let sql = format!(
            "INSERT INTO events (id, organizer_id, location_id, title, description, \
             event_date, event_time, category) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {}",
            EVENT_COLUMNS
        );
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(Uuid::new_v4())
            .bind(input.organizer_id)
            .bind(input.location_id)
            .bind(input.title)
            .bind(input.description)
            .bind(input.date)
            .bind(input.time)
            .bind(input.category)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(event)
    }

    async fn list_events(&self, filter: EventFilter, page: Page) -> StoreResult<Vec<Event>> {
        let sql = format!(
            "SELECT {} FROM events \
             WHERE ($1::date IS NULL OR event_date = $1) \
               AND ($2::text IS NULL OR category ILIKE $2) \
               AND ($3::uuid IS NULL OR location_id = $3) \
             ORDER BY created_at, id LIMIT $4 OFFSET $5",
            EVENT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Event>(&sql)
            .bind(filter.date)
            .bind(filter.category.as_deref().map(like_pattern))
            .bind(filter.location_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_event(&self, id: Uuid) -> StoreResult<EventDetails> {
        let sql = format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS);
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Event", id))?;

        let organizer = self.get_user(event.organizer_id).await?;
        let location = self.get_location(event.location_id).await?;

        let sql = format!(
            "SELECT {} FROM tickets WHERE event_id = $1 ORDER BY created_at, id",
            TICKET_COLUMNS
        );
        let tickets = sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(EventDetails {
            event,
            organizer,
            location,
            tickets,
        })
    }

    async fn update_event(&self, id: Uuid, input: UpdateEvent) -> StoreResult<Event> {
        let mut tx = self.pool.begin().await?;
        if let Some(location_id) = input.location_id {
            require(&mut tx, "locations", "Location", location_id).await?;
        }

        let sql = format!(
            "UPDATE events SET location_id = COALESCE($2, location_id), \
             title = COALESCE($3, title), description = COALESCE($4, description), \
             event_date = COALESCE($5, event_date), event_time = COALESCE($6, event_time), \
             category = COALESCE($7, category), updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            EVENT_COLUMNS
        );
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .bind(input.location_id)
            .bind(input.title)
            .bind(input.description)
            .bind(input.date)
            .bind(input.time)
            .bind(input.category)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Event", id))?;

        tx.commit().await?;
        Ok(event)
    }

    async fn delete_event(&self, id: Uuid) -> StoreResult<()> {
        // Tickets cascade; reservations restrict.
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| constraint_error(e, || format!("Event '{}' has live reservations", id)))?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Event", id));
        }
        Ok(())
    }
}

#[async_trait]
impl TicketRepository for PgStore {
    async fn create_ticket(&self, input: NewTicket) -> StoreResult<Ticket> {
        let mut tx = self.pool.begin().await?;
        require(&mut tx, "events", "Event", input.event_id).await?;

        let sql = format!(
            "INSERT INTO tickets (id, event_id, ticket_type, price, quantity_total, \
             quantity_available) VALUES ($1, $2, $3, $4, $5, $5) RETURNING {}",
            TICKET_COLUMNS
        );
        let ticket = sqlx::query_as::<_, Ticket>(&sql)
            .bind(Uuid::new_v4())
            .bind(input.event_id)
            .bind(input.ticket_type)
            .bind(input.price)
            .bind(input.quantity)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(ticket)
    }

    async fn list_tickets(&self, filter: TicketFilter, page: Page) -> StoreResult<Vec<Ticket>> {
        let sql = format!(
            "SELECT {} FROM tickets WHERE ($1::uuid IS NULL OR event_id = $1) \
             ORDER BY created_at, id LIMIT $2 OFFSET $3",
            TICKET_COLUMNS
        );
        Ok(sqlx::query_as::<_, Ticket>(&sql)
            .bind(filter.event_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_ticket(&self, id: Uuid) -> StoreResult<Ticket> {
        let sql = format!("SELECT {} FROM tickets WHERE id = $1", TICKET_COLUMNS);
        sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Ticket", id))
    }

    async fn update_ticket(&self, id: Uuid, input: UpdateTicket) -> StoreResult<Ticket> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "SELECT {} FROM tickets WHERE id = $1 FOR UPDATE",
            TICKET_COLUMNS
        );
        let current = sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Ticket", id))?;

        let (total, available) = match input.quantity_total {
            Some(total) => (total, current.rebalanced_available(total)?),
            None => (current.quantity_total, current.quantity_available),
        };

        let sql = format!(
            "UPDATE tickets SET ticket_type = COALESCE($2, ticket_type), \
             price = COALESCE($3, price), quantity_total = $4, quantity_available = $5, \
             updated_at = NOW() WHERE id = $1 RETURNING {}",
            TICKET_COLUMNS
        );
        let ticket = sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .bind(input.ticket_type)
            .bind(input.price)
            .bind(total)
            .bind(available)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(ticket)
    }

    async fn delete_ticket(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| constraint_error(e, || format!("Ticket '{}' has live reservations", id)))?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Ticket", id));
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for PgStore {
    async fn reserve(&self, input: &NewReservation) -> StoreResult<Reservation> {
        // Dropping `tx` on any early return rolls everything back.
        let mut tx = self.pool.begin().await?;

        // Parents before the ticket, the order a cascading event delete takes.
        let user_found = lock_key(&mut tx, "users", input.user_id).await?;
        let event_found = lock_key(&mut tx, "events", input.event_id).await?;

        // Serializes every reservation against this ticket until commit.
        let sql = format!(
            "SELECT {} FROM tickets WHERE id = $1 FOR UPDATE",
            TICKET_COLUMNS
        );
        let ticket = sqlx::query_as::<_, Ticket>(&sql)
            .bind(input.ticket_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Ticket", input.ticket_id))?;

        if !user_found {
            return Err(AppError::not_found("User", input.user_id));
        }
        if !event_found {
            return Err(AppError::not_found("Event", input.event_id));
        }
        input.check_ticket(&ticket)?;

        let debited = sqlx::query(
            "UPDATE tickets SET quantity_available = quantity_available - $2, \
             updated_at = NOW() WHERE id = $1 AND quantity_available >= $2",
        )
        .bind(input.ticket_id)
        .bind(input.quantity)
        .execute(&mut *tx)
        .await?;
        if debited.rows_affected() == 0 {
            return Err(AppError::InsufficientInventory(format!(
                "Ticket '{}' no longer has {} unit(s) available",
                input.ticket_id, input.quantity
            )));
        }

        let sql = format!(
            "INSERT INTO reservations (id, user_id, event_id, ticket_id, quantity) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            RESERVATION_COLUMNS
        );
        let reservation = sqlx::query_as::<_, Reservation>(&sql)
            .bind(Uuid::new_v4())
            .bind(input.user_id)
            .bind(input.event_id)
            .bind(input.ticket_id)
            .bind(input.quantity)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(reservation)
    }

    async fn cancel(&self, id: Uuid) -> StoreResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let ticket_id: Uuid = sqlx::query_scalar("SELECT ticket_id FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation", id))?;

        // Ticket before reservation, the same order reserve and delete_ticket take.
        sqlx::query("SELECT id FROM tickets WHERE id = $1 FOR UPDATE")
            .bind(ticket_id)
            .execute(&mut *tx)
            .await?;

        // A concurrent cancel of the same row waits above, then sees nothing.
        let sql = format!(
            "SELECT {} FROM reservations WHERE id = $1 FOR UPDATE",
            RESERVATION_COLUMNS
        );
        let reservation = sqlx::query_as::<_, Reservation>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation", id))?;

        sqlx::query(
            "UPDATE tickets SET quantity_available = quantity_available + $2, \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(reservation.ticket_id)
        .bind(reservation.quantity)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(reservation)
    }

    async fn list_reservations(
        &self,
        filter: ReservationFilter,
        page: Page,
    ) -> StoreResult<Vec<ReservationDetails>> {
        let sql = format!(
            "{} WHERE ($1::uuid IS NULL OR r.user_id = $1) \
             ORDER BY r.reserved_at, r.id LIMIT $2 OFFSET $3",
            RESERVATION_DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(filter.user_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ReservationDetails::from).collect())
    }

    async fn get_reservation(&self, id: Uuid) -> StoreResult<ReservationDetails> {
        let sql = format!("{} WHERE r.id = $1", RESERVATION_DETAILS_SELECT);
        sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(ReservationDetails::from)
            .ok_or_else(|| AppError::not_found("Reservation", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rock"), "%rock%");
        assert_eq!(like_pattern("100%_off"), "%100\\%\\_off%");
    }

    #[test]
    fn test_non_database_errors_stay_internal() {
        let err = constraint_error(sqlx::Error::PoolTimedOut, || "conflict".to_string());
        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}
