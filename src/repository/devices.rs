//! Devices repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::device::{DeviceDetails, DeviceFilter, DeviceWrite},
    services::devices::DeviceStore,
};

const SELECT_DEVICE: &str = r#"
    SELECT d.id, d.type_id, d.producer_id, d.serial_number, d.available,
           t.name AS type_name, p.name AS producer_name
    FROM devices d
    LEFT JOIN device_types t ON t.id = d.type_id
    LEFT JOIN producers p ON p.id = d.producer_id
"#;

#[derive(Clone)]
pub struct DevicesRepository {
    pool: Pool<Postgres>,
}

impl DevicesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceStore for DevicesRepository {
    async fn list(&self, filter: DeviceFilter) -> AppResult<Vec<DeviceDetails>> {
        let rows = match filter {
            DeviceFilter::All => {
                sqlx::query_as::<_, DeviceDetails>(&format!("{} ORDER BY d.id", SELECT_DEVICE))
                    .fetch_all(&self.pool)
                    .await?
            }
            DeviceFilter::Available => {
                sqlx::query_as::<_, DeviceDetails>(&format!(
                    "{} WHERE d.available = TRUE ORDER BY d.id",
                    SELECT_DEVICE
                ))
                .fetch_all(&self.pool)
                .await?
            }
            DeviceFilter::Producer(producer_id) => {
                sqlx::query_as::<_, DeviceDetails>(&format!(
                    "{} WHERE d.producer_id = $1 ORDER BY d.id",
                    SELECT_DEVICE
                ))
                .bind(producer_id)
                .fetch_all(&self.pool)
                .await?
            }
            DeviceFilter::Type(type_id) => {
                sqlx::query_as::<_, DeviceDetails>(&format!(
                    "{} WHERE d.type_id = $1 ORDER BY d.id",
                    SELECT_DEVICE
                ))
                .bind(type_id)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    async fn get(&self, id: i32) -> AppResult<Option<DeviceDetails>> {
        let row = sqlx::query_as::<_, DeviceDetails>(&format!("{} WHERE d.id = $1", SELECT_DEVICE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn serial_taken(&self, serial_number: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM devices WHERE LOWER(serial_number) = LOWER($1) AND id != $2)",
            )
            .bind(serial_number)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM devices WHERE LOWER(serial_number) = LOWER($1))")
                .bind(serial_number)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    async fn producer_exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM producers WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn device_type_exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM device_types WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn has_active_loan(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM loans WHERE device_id = $1 AND NOT returned)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert(&self, device: &DeviceWrite) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO devices (type_id, producer_id, serial_number, available)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(device.type_id)
        .bind(device.producer_id)
        .bind(&device.serial_number)
        .bind(device.available)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_write)
    }

    async fn update(&self, id: i32, device: &DeviceWrite) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE devices SET type_id = $1, producer_id = $2, serial_number = $3, available = $4
            WHERE id = $5
            "#,
        )
        .bind(device.type_id)
        .bind(device.producer_id)
        .bind(&device.serial_number)
        .bind(device.available)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::from_write)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_write)?;
        Ok(result.rows_affected() > 0)
    }
}
