use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use crate::models::{NewTicket, TicketFilter, UpdateTicket};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::pagination::{Page, Pagination};
use crate::utils::response::{created, empty_success, success};

pub async fn create_ticket(
    State(state): State<AppState>,
    payload: Result<Json<NewTicket>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(input) = payload?;
    input.validate()?;
    let ticket = state.store.create_ticket(input).await?;
    tracing::info!(
        ticket_id = %ticket.id,
        quantity = ticket.quantity_total,
        "Tickets issued"
    );
    Ok(created(ticket, "Ticket created"))
}

pub async fn list_tickets(
    State(state): State<AppState>,
    filter: Result<Query<TicketFilter>, QueryRejection>,
    pagination: Result<Query<Pagination>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(filter) = filter?;
    let Query(pagination) = pagination?;
    let tickets = state
        .store
        .list_tickets(filter, Page::try_from(pagination)?)
        .await?;
    Ok(success(tickets, "Tickets retrieved"))
}

pub async fn get_ticket(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let ticket = state.store.get_ticket(id).await?;
    Ok(success(ticket, "Ticket retrieved"))
}

pub async fn update_ticket(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateTicket>, JsonRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    input.validate()?;
    let ticket = state.store.update_ticket(id, input).await?;
    Ok(success(ticket, "Ticket updated"))
}

pub async fn delete_ticket(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    state.store.delete_ticket(id).await?;
    Ok(empty_success("Ticket deleted"))
}
