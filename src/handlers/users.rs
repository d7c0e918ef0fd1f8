use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use crate::models::{NewUser, UpdateUser};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::pagination::{Page, Pagination};
use crate::utils::response::{created, empty_success, success};

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(input) = payload?;
    input.validate()?;
    let user = state.store.create_user(input).await?;
    Ok(created(user, "User registered"))
}

pub async fn list_users(
    State(state): State<AppState>,
    pagination: Result<Query<Pagination>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(pagination) = pagination?;
    let users = state.store.list_users(Page::try_from(pagination)?).await?;
    Ok(success(users, "Users retrieved"))
}

pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let user = state.store.get_user(id).await?;
    Ok(success(user, "User retrieved"))
}

pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateUser>, JsonRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    input.validate()?;
    let user = state.store.update_user(id, input).await?;
    Ok(success(user, "User updated"))
}

pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    state.store.delete_user(id).await?;
    Ok(empty_success("User deleted"))
}
