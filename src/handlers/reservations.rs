use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use crate::models::{NewReservation, ReservationFilter};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::pagination::{Page, Pagination};
use crate::utils::response::{created, empty_success, success};

/// `POST /reservations` with `{ userId, eventId, ticketId, quantity }`.
pub async fn create_reservation(
    State(state): State<AppState>,
    payload: Result<Json<NewReservation>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(input) = payload?;
    let reservation = state.reservations.create_reservation(input).await?;
    Ok(created(reservation, "Reservation created"))
}

pub async fn list_reservations(
    State(state): State<AppState>,
    filter: Result<Query<ReservationFilter>, QueryRejection>,
    pagination: Result<Query<Pagination>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(filter) = filter?;
    let Query(pagination) = pagination?;
    let reservations = state
        .reservations
        .get_reservations(filter.user_id, Page::try_from(pagination)?)
        .await?;
    Ok(success(reservations, "Reservations retrieved"))
}

pub async fn get_reservation(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let reservation = state.reservations.get_reservation_by_id(id).await?;
    Ok(success(reservation, "Reservation retrieved"))
}

pub async fn cancel_reservation(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    state.reservations.cancel_reservation(id).await?;
    Ok(empty_success("Reservation cancelled"))
}
