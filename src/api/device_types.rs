//! Device type endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::device_type::{DeviceType, DeviceTypeRequest},
};

/// List all device types
#[utoipa::path(
    get,
    path = "/device-types",
    tag = "device-types",
    responses(
        (status = 200, description = "Device types with their device counts", body = Vec<DeviceType>)
    )
)]
pub async fn list_device_types(State(state): State<crate::AppState>) -> AppResult<Json<Vec<DeviceType>>> {
    let device_types = state.services.device_types.list().await?;
    Ok(Json(device_types))
}

#[utoipa::path(
    get,
    path = "/device-types/{id}",
    tag = "device-types",
    params(("id" = i32, Path, description = "Device type ID")),
    responses(
        (status = 200, description = "Device type details", body = DeviceType),
        (status = 404, description = "Device type not found")
    )
)]
pub async fn get_device_type(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeviceType>> {
    let device_type = state.services.device_types.get_by_id(id).await?;
    Ok(Json(device_type))
}

#[utoipa::path(
    post,
    path = "/device-types",
    tag = "device-types",
    request_body = DeviceTypeRequest,
    responses(
        (status = 201, description = "Device type created", body = DeviceType),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_device_type(
    State(state): State<crate::AppState>,
    Json(data): Json<DeviceTypeRequest>,
) -> AppResult<(StatusCode, Json<DeviceType>)> {
    data.validate()?;
    let device_type = state.services.device_types.create(&data).await?;
    Ok((StatusCode::CREATED, Json(device_type)))
}

#[utoipa::path(
    put,
    path = "/device-types/{id}",
    tag = "device-types",
    params(("id" = i32, Path, description = "Device type ID")),
    request_body = DeviceTypeRequest,
    responses(
        (status = 200, description = "Device type updated", body = DeviceType),
        (status = 404, description = "Device type not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_device_type(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<DeviceTypeRequest>,
) -> AppResult<Json<DeviceType>> {
    data.validate()?;
    let device_type = state.services.device_types.update(id, &data).await?;
    Ok(Json(device_type))
}

#[utoipa::path(
    delete,
    path = "/device-types/{id}",
    tag = "device-types",
    params(("id" = i32, Path, description = "Device type ID")),
    responses(
        (status = 204, description = "Device type deleted"),
        (status = 404, description = "Device type not found"),
        (status = 409, description = "Devices still reference the type")
    )
)]
pub async fn delete_device_type(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.device_types.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
