//! Branches repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::branch::Branch,
};

#[derive(Clone)]
pub struct BranchesRepository {
    pool: Pool<Postgres>,
}

impl BranchesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Branch>> {
        let rows = sqlx::query_as::<_, Branch>("SELECT id, name FROM branches ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Branch> {
        sqlx::query_as::<_, Branch>("SELECT id, name FROM branches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Branch {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM branches WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn create(&self, name: &str) -> AppResult<Branch> {
        sqlx::query_as::<_, Branch>("INSERT INTO branches (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from_write)
    }

    pub async fn update(&self, id: i32, name: &str) -> AppResult<Branch> {
        sqlx::query_as::<_, Branch>("UPDATE branches SET name = $1 WHERE id = $2 RETURNING id, name")
            .bind(name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_write)?
            .ok_or_else(|| AppError::NotFound(format!("Branch {} not found", id)))
    }

    /// Delete a branch; refused by the schema while employees still belong to it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM branches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_write)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Branch {} not found", id)));
        }
        Ok(())
    }
}
