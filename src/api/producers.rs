//! Producer endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::producer::{Producer, ProducerRequest},
};

/// List all producers
#[utoipa::path(
    get,
    path = "/producers",
    tag = "producers",
    responses(
        (status = 200, description = "Producers with their device counts", body = Vec<Producer>)
    )
)]
pub async fn list_producers(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Producer>>> {
    let producers = state.services.producers.list().await?;
    Ok(Json(producers))
}

/// Get producer by ID
#[utoipa::path(
    get,
    path = "/producers/{id}",
    tag = "producers",
    params(("id" = i32, Path, description = "Producer ID")),
    responses(
        (status = 200, description = "Producer details", body = Producer),
        (status = 404, description = "Producer not found")
    )
)]
pub async fn get_producer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Producer>> {
    let producer = state.services.producers.get_by_id(id).await?;
    Ok(Json(producer))
}

/// Create producer
#[utoipa::path(
    post,
    path = "/producers",
    tag = "producers",
    request_body = ProducerRequest,
    responses(
        (status = 201, description = "Producer created", body = Producer),
        (status = 400, description = "Invalid name"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_producer(
    State(state): State<crate::AppState>,
    Json(data): Json<ProducerRequest>,
) -> AppResult<(StatusCode, Json<Producer>)> {
    data.validate()?;
    let producer = state.services.producers.create(&data).await?;
    Ok((StatusCode::CREATED, Json(producer)))
}

/// Rename producer
#[utoipa::path(
    put,
    path = "/producers/{id}",
    tag = "producers",
    params(("id" = i32, Path, description = "Producer ID")),
    request_body = ProducerRequest,
    responses(
        (status = 200, description = "Producer updated", body = Producer),
        (status = 404, description = "Producer not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_producer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<ProducerRequest>,
) -> AppResult<Json<Producer>> {
    data.validate()?;
    let producer = state.services.producers.update(id, &data).await?;
    Ok(Json(producer))
}

/// Delete producer
#[utoipa::path(
    delete,
    path = "/producers/{id}",
    tag = "producers",
    params(("id" = i32, Path, description = "Producer ID")),
    responses(
        (status = 204, description = "Producer deleted"),
        (status = 404, description = "Producer not found"),
        (status = 409, description = "Devices still reference the producer")
    )
)]
pub async fn delete_producer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.producers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
