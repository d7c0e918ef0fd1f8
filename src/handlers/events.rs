use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use crate::models::{EventFilter, NewEvent, UpdateEvent};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::pagination::{Page, Pagination};
use crate::utils::response::{created, empty_success, success};

pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<NewEvent>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(input) = payload?;
    input.validate()?;
    let event = state.store.create_event(input).await?;
    tracing::info!(event_id = %event.id, "Event created");
    Ok(created(event, "Event created"))
}

/// `GET /events?date=&category=&locationId=&page=&limit=`
pub async fn list_events(
    State(state): State<AppState>,
    filter: Result<Query<EventFilter>, QueryRejection>,
    pagination: Result<Query<Pagination>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(filter) = filter?;
    let Query(pagination) = pagination?;
    let events = state
        .store
        .list_events(filter, Page::try_from(pagination)?)
        .await?;
    Ok(success(events, "Events retrieved"))
}

pub async fn get_event(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let event = state.store.get_event(id).await?;
    Ok(success(event, "Event retrieved"))
}

pub async fn update_event(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateEvent>, JsonRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    input.validate()?;
    let event = state.store.update_event(id, input).await?;
    Ok(success(event, "Event updated"))
}

pub async fn delete_event(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    state.store.delete_event(id).await?;
    Ok(empty_success("Event deleted"))
}
