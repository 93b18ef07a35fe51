//! Device producer (manufacturer) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Producer with the number of devices it makes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Producer {
    pub id: i32,
    pub name: String,
    pub device_count: i64,
}

/// Create or rename a producer
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProducerRequest {
    #[validate(length(min = 1, max = 100, message = "Producer name must be 1-100 characters"))]
    pub name: String,
}
