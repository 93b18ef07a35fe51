//! Device endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::device::{DeviceDetails, DeviceFilter, DeviceRequest},
};

/// List all devices
#[utoipa::path(
    get,
    path = "/devices",
    tag = "devices",
    responses(
        (status = 200, description = "Device list", body = Vec<DeviceDetails>)
    )
)]
pub async fn list_devices(State(state): State<crate::AppState>) -> AppResult<Json<Vec<DeviceDetails>>> {
    let devices = state.services.devices.list(DeviceFilter::All).await?;
    Ok(Json(devices))
}

/// List devices that can be lent right now
#[utoipa::path(
    get,
    path = "/devices/available",
    tag = "devices",
    responses(
        (status = 200, description = "Available devices", body = Vec<DeviceDetails>)
    )
)]
pub async fn list_available_devices(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<DeviceDetails>>> {
    let devices = state.services.devices.list(DeviceFilter::Available).await?;
    Ok(Json(devices))
}

/// List devices made by one producer
#[utoipa::path(
    get,
    path = "/devices/producer/{id}",
    tag = "devices",
    params(("id" = i32, Path, description = "Producer ID")),
    responses(
        (status = 200, description = "Devices of the producer", body = Vec<DeviceDetails>)
    )
)]
pub async fn list_devices_by_producer(
    State(state): State<crate::AppState>,
    Path(producer_id): Path<i32>,
) -> AppResult<Json<Vec<DeviceDetails>>> {
    let devices = state.services.devices.list(DeviceFilter::Producer(producer_id)).await?;
    Ok(Json(devices))
}

/// List devices of one type
#[utoipa::path(
    get,
    path = "/devices/type/{id}",
    tag = "devices",
    params(("id" = i32, Path, description = "Device type ID")),
    responses(
        (status = 200, description = "Devices of the type", body = Vec<DeviceDetails>)
    )
)]
pub async fn list_devices_by_type(
    State(state): State<crate::AppState>,
    Path(type_id): Path<i32>,
) -> AppResult<Json<Vec<DeviceDetails>>> {
    let devices = state.services.devices.list(DeviceFilter::Type(type_id)).await?;
    Ok(Json(devices))
}

/// Get device by ID
#[utoipa::path(
    get,
    path = "/devices/{id}",
    tag = "devices",
    params(("id" = i32, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Device details", body = DeviceDetails),
        (status = 404, description = "Device not found")
    )
)]
pub async fn get_device(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeviceDetails>> {
    let device = state.services.devices.get_by_id(id).await?;
    Ok(Json(device))
}

/// Register device
#[utoipa::path(
    post,
    path = "/devices",
    tag = "devices",
    request_body = DeviceRequest,
    responses(
        (status = 201, description = "Device created", body = DeviceDetails),
        (status = 400, description = "Invalid serial number, producer or type"),
        (status = 409, description = "Serial number already registered")
    )
)]
pub async fn create_device(
    State(state): State<crate::AppState>,
    Json(data): Json<DeviceRequest>,
) -> AppResult<(StatusCode, Json<DeviceDetails>)> {
    data.validate()?;
    let device = state.services.devices.create(&data).await?;
    Ok((StatusCode::CREATED, Json(device)))
}

/// Replace device
#[utoipa::path(
    put,
    path = "/devices/{id}",
    tag = "devices",
    params(("id" = i32, Path, description = "Device ID")),
    request_body = DeviceRequest,
    responses(
        (status = 200, description = "Device updated", body = DeviceDetails),
        (status = 400, description = "Invalid serial number, producer or type"),
        (status = 404, description = "Device not found"),
        (status = 409, description = "Serial number taken, or device is on loan")
    )
)]
pub async fn update_device(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<DeviceRequest>,
) -> AppResult<Json<DeviceDetails>> {
    data.validate()?;
    let device = state.services.devices.update(id, &data).await?;
    Ok(Json(device))
}

/// Delete device together with its loan records
#[utoipa::path(
    delete,
    path = "/devices/{id}",
    tag = "devices",
    params(("id" = i32, Path, description = "Device ID")),
    responses(
        (status = 204, description = "Device deleted"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn delete_device(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.devices.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
