use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use crate::models::{NewLocation, UpdateLocation};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::pagination::{Page, Pagination};
use crate::utils::response::{created, empty_success, success};

pub async fn create_location(
    State(state): State<AppState>,
    payload: Result<Json<NewLocation>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(input) = payload?;
    input.validate()?;
    let location = state.store.create_location(input).await?;
    Ok(created(location, "Location created"))
}

pub async fn list_locations(
    State(state): State<AppState>,
    pagination: Result<Query<Pagination>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(pagination) = pagination?;
    let locations = state
        .store
        .list_locations(Page::try_from(pagination)?)
        .await?;
    Ok(success(locations, "Locations retrieved"))
}

pub async fn get_location(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let location = state.store.get_location(id).await?;
    Ok(success(location, "Location retrieved"))
}

pub async fn update_location(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateLocation>, JsonRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    input.validate()?;
    let location = state.store.update_location(id, input).await?;
    Ok(success(location, "Location updated"))
}

pub async fn delete_location(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    state.store.delete_location(id).await?;
    Ok(empty_success("Location deleted"))
}
