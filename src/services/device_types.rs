//! Device type management service

use crate::{
    error::{AppError, AppResult},
    models::device_type::{DeviceType, DeviceTypeRequest},
    repository::Repository,
    services::normalize_name,
};

#[derive(Clone)]
pub struct DeviceTypesService {
    repository: Repository,
}

impl DeviceTypesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<DeviceType>> {
        self.repository.device_types.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<DeviceType> {
        self.repository.device_types.get_by_id(id).await
    }

    pub async fn create(&self, data: &DeviceTypeRequest) -> AppResult<DeviceType> {
        let name = normalize_name("Device type", &data.name)?;
        if self.repository.device_types.name_exists(&name, None).await? {
            return Err(AppError::duplicate(format!("Device type {} already exists", name)));
        }
        let device_type = self.repository.device_types.create(&name).await?;
        tracing::info!("Device type {} created: {}", device_type.id, device_type.name);
        Ok(device_type)
    }

    pub async fn update(&self, id: i32, data: &DeviceTypeRequest) -> AppResult<DeviceType> {
        self.repository.device_types.get_by_id(id).await?;
        let name = normalize_name("Device type", &data.name)?;
        if self.repository.device_types.name_exists(&name, Some(id)).await? {
            return Err(AppError::duplicate(format!("Device type {} already exists", name)));
        }
        self.repository.device_types.update(id, &name).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.device_types.delete(id).await?;
        tracing::info!("Device type {} deleted", id);
        Ok(())
    }
}
