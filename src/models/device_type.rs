//! Device type (laptop, phone, monitor...) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Device type with the number of devices of that type
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceType {
    pub id: i32,
    pub name: String,
    pub device_count: i64,
}

/// Create or rename a device type
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeviceTypeRequest {
    #[validate(length(min = 1, max = 100, message = "Device type name must be 1-100 characters"))]
    pub name: String,
}
