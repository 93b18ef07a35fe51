//! Producer management service

use crate::{
    error::{AppError, AppResult},
    models::producer::{Producer, ProducerRequest},
    repository::Repository,
    services::normalize_name,
};

#[derive(Clone)]
pub struct ProducersService {
    repository: Repository,
}

impl ProducersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Producer>> {
        self.repository.producers.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Producer> {
        self.repository.producers.get_by_id(id).await
    }

    pub async fn create(&self, data: &ProducerRequest) -> AppResult<Producer> {
        let name = self.unique_name(&data.name, None).await?;
        let producer = self.repository.producers.create(&name).await?;
        tracing::info!("Producer {} created: {}", producer.id, producer.name);
        Ok(producer)
    }

    pub async fn update(&self, id: i32, data: &ProducerRequest) -> AppResult<Producer> {
        self.repository.producers.get_by_id(id).await?;
        let name = self.unique_name(&data.name, Some(id)).await?;
        self.repository.producers.update(id, &name).await
    }

    /// Delete a producer that no device references
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.producers.delete(id).await?;
        tracing::info!("Producer {} deleted", id);
        Ok(())
    }

    async fn unique_name(&self, raw: &str, exclude_id: Option<i32>) -> AppResult<String> {
        let name = normalize_name("Producer", raw)?;
        if self.repository.producers.name_exists(&name, exclude_id).await? {
            return Err(AppError::duplicate(format!("Producer {} already exists", name)));
        }
        Ok(name)
    }
}
