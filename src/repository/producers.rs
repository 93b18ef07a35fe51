//! Producers repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::producer::Producer,
};

const SELECT_PRODUCER: &str = r#"
    SELECT p.id, p.name,
           (SELECT COUNT(*) FROM devices d WHERE d.producer_id = p.id) AS device_count
    FROM producers p
"#;

#[derive(Clone)]
pub struct ProducersRepository {
    pool: Pool<Postgres>,
}

impl ProducersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Producer>> {
        let rows = sqlx::query_as::<_, Producer>(&format!("{} ORDER BY p.name", SELECT_PRODUCER))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Producer> {
        sqlx::query_as::<_, Producer>(&format!("{} WHERE p.id = $1", SELECT_PRODUCER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Producer {} not found", id)))
    }

    /// Check if a name is already taken (case-insensitive)
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM producers WHERE LOWER(name) = LOWER($1) AND id != $2)")
                .bind(name)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM producers WHERE LOWER(name) = LOWER($1))")
                .bind(name)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    pub async fn create(&self, name: &str) -> AppResult<Producer> {
        sqlx::query_as::<_, Producer>(
            "INSERT INTO producers (name) VALUES ($1) RETURNING id, name, 0::bigint AS device_count",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_write)
    }

    pub async fn update(&self, id: i32, name: &str) -> AppResult<Producer> {
        sqlx::query_as::<_, Producer>(
            r#"
            UPDATE producers p SET name = $1 WHERE p.id = $2
            RETURNING p.id, p.name,
                      (SELECT COUNT(*) FROM devices d WHERE d.producer_id = p.id) AS device_count
            "#,
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_write)?
        .ok_or_else(|| AppError::NotFound(format!("Producer {} not found", id)))
    }

    /// Delete a producer; refused by the schema while devices reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM producers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_write)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Producer {} not found", id)));
        }
        Ok(())
    }
}
