//! Device model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Device row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Device {
    pub id: i32,
    pub type_id: i32,
    pub producer_id: i32,
    pub serial_number: String,
    /// False while the device is out on loan (or withdrawn)
    pub available: bool,
}

/// Device with producer and type names resolved
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetails {
    pub id: i32,
    pub type_id: i32,
    pub producer_id: i32,
    pub serial_number: String,
    pub available: bool,
    pub type_name: Option<String>,
    pub producer_name: Option<String>,
}

/// Create or replace a device
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRequest {
    #[validate(range(min = 1, message = "Device type is required"))]
    pub type_id: i32,
    #[validate(range(min = 1, message = "Producer is required"))]
    pub producer_id: i32,
    /// Trimmed before storage; unique regardless of case
    pub serial_number: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Device fields after normalization, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceWrite {
    pub type_id: i32,
    pub producer_id: i32,
    pub serial_number: String,
    pub available: bool,
}

/// Row selection for device listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceFilter {
    All,
    Available,
    Producer(i32),
    Type(i32),
}

impl DeviceFilter {
    /// Whether a stored device belongs to this selection
    pub fn matches(&self, device: &Device) -> bool {
        match *self {
            DeviceFilter::All => true,
            DeviceFilter::Available => device.available,
            DeviceFilter::Producer(id) => device.producer_id == id,
            DeviceFilter::Type(id) => device.type_id == id,
        }
    }
}
