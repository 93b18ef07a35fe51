//! Device types repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::device_type::DeviceType,
};

const SELECT_DEVICE_TYPE: &str = r#"
    SELECT t.id, t.name,
           (SELECT COUNT(*) FROM devices d WHERE d.type_id = t.id) AS device_count
    FROM device_types t
"#;

#[derive(Clone)]
pub struct DeviceTypesRepository {
    pool: Pool<Postgres>,
}

impl DeviceTypesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<DeviceType>> {
        let rows = sqlx::query_as::<_, DeviceType>(&format!("{} ORDER BY t.name", SELECT_DEVICE_TYPE))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<DeviceType> {
        sqlx::query_as::<_, DeviceType>(&format!("{} WHERE t.id = $1", SELECT_DEVICE_TYPE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Device type {} not found", id)))
    }

    /// Check if a name is already taken (case-insensitive)
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM device_types WHERE LOWER(name) = LOWER($1) AND id != $2)")
                .bind(name)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM device_types WHERE LOWER(name) = LOWER($1))")
                .bind(name)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    pub async fn create(&self, name: &str) -> AppResult<DeviceType> {
        sqlx::query_as::<_, DeviceType>(
            "INSERT INTO device_types (name) VALUES ($1) RETURNING id, name, 0::bigint AS device_count",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_write)
    }

    pub async fn update(&self, id: i32, name: &str) -> AppResult<DeviceType> {
        sqlx::query_as::<_, DeviceType>(
            r#"
            UPDATE device_types t SET name = $1 WHERE t.id = $2
            RETURNING t.id, t.name,
                      (SELECT COUNT(*) FROM devices d WHERE d.type_id = t.id) AS device_count
            "#,
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_write)?
        .ok_or_else(|| AppError::NotFound(format!("Device type {} not found", id)))
    }

    /// Delete a device type; refused by the schema while devices reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM device_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_write)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Device type {} not found", id)));
        }
        Ok(())
    }
}
