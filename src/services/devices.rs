//! Device inventory service

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::{AppError, AppResult, ConflictKind},
    models::device::{DeviceDetails, DeviceFilter, DeviceRequest, DeviceWrite},
};

pub const SERIAL_NUMBER_MAX_LEN: usize = 100;

static SERIAL_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Persistence operations the device service relies on
#[async_trait]
pub trait DeviceStore: Send + Sync {
    async fn list(&self, filter: DeviceFilter) -> AppResult<Vec<DeviceDetails>>;
    async fn get(&self, id: i32) -> AppResult<Option<DeviceDetails>>;
    /// Case-insensitive lookup, optionally ignoring one device
    async fn serial_taken(&self, serial_number: &str, exclude_id: Option<i32>) -> AppResult<bool>;
    async fn producer_exists(&self, id: i32) -> AppResult<bool>;
    async fn device_type_exists(&self, id: i32) -> AppResult<bool>;
    async fn has_active_loan(&self, id: i32) -> AppResult<bool>;
    async fn insert(&self, device: &DeviceWrite) -> AppResult<i32>;
    /// Returns false when no such device exists
    async fn update(&self, id: i32, device: &DeviceWrite) -> AppResult<bool>;
    /// Returns false when no such device exists
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// Trim a serial number and check it is storable
pub fn normalize_serial_number(raw: &str) -> AppResult<String> {
    let serial = raw.trim();
    if serial.is_empty() {
        return Err(AppError::Validation("Serial number is required".to_string()));
    }
    if serial.chars().count() > SERIAL_NUMBER_MAX_LEN {
        return Err(AppError::Validation(format!(
            "Serial number must be at most {} characters",
            SERIAL_NUMBER_MAX_LEN
        )));
    }
    if !SERIAL_NUMBER_RE.is_match(serial) {
        return Err(AppError::Validation(
            "Serial number may only contain letters, digits, '-' and '_'".to_string(),
        ));
    }
    Ok(serial.to_string())
}

#[derive(Clone)]
pub struct DevicesService {
    store: Arc<dyn DeviceStore>,
}

impl DevicesService {
    pub fn new(store: Arc<dyn DeviceStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: DeviceFilter) -> AppResult<Vec<DeviceDetails>> {
        tracing::debug!("Listing devices: {:?}", filter);
        self.store.list(filter).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<DeviceDetails> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Device {} not found", id)))
    }

    /// Register a new device
    pub async fn create(&self, data: &DeviceRequest) -> AppResult<DeviceDetails> {
        let device = self.prepare(data, None).await?;
        let id = self.store.insert(&device).await?;
        tracing::info!("Device {} created (serial {})", id, device.serial_number);
        self.get_by_id(id).await
    }

    /// Replace every field of a device
    pub async fn update(&self, id: i32, data: &DeviceRequest) -> AppResult<DeviceDetails> {
        if self.store.get(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Device {} not found", id)));
        }

        let device = self.prepare(data, Some(id)).await?;

        if device.available && self.store.has_active_loan(id).await? {
            return Err(AppError::Conflict(
                ConflictKind::DeviceUnavailable,
                format!("Device {} is on an active loan", id),
            ));
        }

        if !self.store.update(id, &device).await? {
            return Err(AppError::NotFound(format!("Device {} not found", id)));
        }
        tracing::info!("Device {} updated", id);
        self.get_by_id(id).await
    }

    /// Delete a device along with its loan records
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound(format!("Device {} not found", id)));
        }
        tracing::info!("Device {} deleted", id);
        Ok(())
    }

    async fn prepare(&self, data: &DeviceRequest, exclude_id: Option<i32>) -> AppResult<DeviceWrite> {
        let serial_number = normalize_serial_number(&data.serial_number)?;

        if !self.store.device_type_exists(data.type_id).await? {
            return Err(AppError::Validation(format!("Device type {} does not exist", data.type_id)));
        }
        if !self.store.producer_exists(data.producer_id).await? {
            return Err(AppError::Validation(format!("Producer {} does not exist", data.producer_id)));
        }

        if self.store.serial_taken(&serial_number, exclude_id).await? {
            tracing::warn!("Rejected duplicate serial number {}", serial_number);
            return Err(AppError::duplicate(format!(
                "Device with serial number {} already exists",
                serial_number
            )));
        }

        Ok(DeviceWrite {
            type_id: data.type_id,
            producer_id: data.producer_id,
            serial_number,
            available: data.available,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::MemoryDb;

    fn service(db: &MemoryDb) -> DevicesService {
        DevicesService::new(Arc::new(db.clone()))
    }

    fn request(serial: &str) -> DeviceRequest {
        DeviceRequest {
            type_id: 1,
            producer_id: 1,
            serial_number: serial.to_string(),
            available: true,
        }
    }

    #[test]
    fn test_normalize_serial_number() {
        assert_eq!(normalize_serial_number("  NEW-001  ").unwrap(), "NEW-001");
        assert!(matches!(normalize_serial_number("   "), Err(AppError::Validation(_))));
        assert!(matches!(normalize_serial_number(""), Err(AppError::Validation(_))));
        assert!(matches!(normalize_serial_number("AB 12"), Err(AppError::Validation(_))));
        assert!(normalize_serial_number(&"X".repeat(100)).is_ok());
        assert!(normalize_serial_number(&"X".repeat(101)).is_err());
    }

    #[tokio::test]
    async fn test_create_trims_and_resolves_names() {
        let db = MemoryDb::seeded();

        let device = service(&db).create(&request("  NEW-001  ")).await.unwrap();

        assert_eq!(device.serial_number, "NEW-001");
        assert!(device.available);
        assert_eq!(device.type_name.as_deref(), Some("Laptop"));
        assert_eq!(device.producer_name.as_deref(), Some("Dell"));
        assert_eq!(db.device(device.id).serial_number, "NEW-001");
    }

    #[tokio::test]
    async fn test_create_blank_serial_is_validation() {
        let db = MemoryDb::seeded();

        let err = service(&db).create(&request("   ")).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(db.snapshot().devices.len(), 3);
    }

    #[tokio::test]
    async fn test_create_duplicate_ignores_case_and_padding() {
        let db = MemoryDb::default();
        db.with(|t| {
            t.producers.insert(1, "Dell".to_string());
            t.device_types.insert(1, "Laptop".to_string());
        });
        let devices = service(&db);
        devices.create(&request("ABC-123")).await.unwrap();

        let err = devices.create(&request("  abc-123  ")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(ConflictKind::Duplicate, _)));
        let tables = db.snapshot();
        assert_eq!(tables.devices.len(), 1);
        assert_eq!(tables.devices[&1].serial_number, "ABC-123");
    }

    #[tokio::test]
    async fn test_create_unknown_producer_is_validation() {
        let db = MemoryDb::seeded();
        let mut data = request("NEW-002");
        data.producer_id = 9;

        let err = service(&db).create(&data).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_may_keep_own_serial() {
        let db = MemoryDb::seeded();

        let updated = service(&db).update(1, &request("dev-001")).await.unwrap();

        assert_eq!(updated.serial_number, "dev-001");
    }

    #[tokio::test]
    async fn test_update_to_other_serial_is_conflict() {
        let db = MemoryDb::seeded();

        let err = service(&db).update(1, &request("DEV-003")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(ConflictKind::Duplicate, _)));
        assert_eq!(db.device(1).serial_number, "DEV-001");
    }

    #[tokio::test]
    async fn test_update_missing_device_is_not_found() {
        let db = MemoryDb::seeded();

        let err = service(&db).update(42, &request("NEW-9")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_cannot_free_device_on_loan() {
        let db = MemoryDb::seeded();
        db.with(|t| {
            t.devices.get_mut(&1).unwrap().available = false;
            t.loans.insert(
                1,
                crate::models::Loan {
                    id: 1,
                    employee_id: 1,
                    device_id: 1,
                    loan_date: chrono::Utc::now(),
                    return_date: None,
                    returned: false,
                },
            );
        });

        let err = service(&db).update(1, &request("DEV-001")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(ConflictKind::DeviceUnavailable, _)));
        assert!(!db.device(1).available);
    }

    #[tokio::test]
    async fn test_filtered_reads() {
        let db = MemoryDb::seeded();
        db.with(|t| {
            t.producers.insert(2, "Lenovo".to_string());
            t.devices.get_mut(&3).unwrap().producer_id = 2;
        });
        let devices = service(&db);

        let available: Vec<i32> = devices
            .list(DeviceFilter::Available)
            .await
            .unwrap()
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(available, vec![1, 3]);

        let lenovo = devices.list(DeviceFilter::Producer(2)).await.unwrap();
        assert_eq!(lenovo.len(), 1);
        assert_eq!(lenovo[0].producer_name.as_deref(), Some("Lenovo"));

        assert_eq!(devices.list(DeviceFilter::Type(1)).await.unwrap().len(), 3);
        assert!(devices.list(DeviceFilter::Type(7)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = MemoryDb::seeded();
        let devices = service(&db);

        devices.delete(2).await.unwrap();

        assert!(matches!(devices.get_by_id(2).await, Err(AppError::NotFound(_))));
        assert!(matches!(devices.delete(2).await, Err(AppError::NotFound(_))));
    }
}
