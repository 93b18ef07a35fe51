//! Employees repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::employee::{EmployeeDetails, EmployeeRequest},
};

const SELECT_EMPLOYEE: &str = r#"
    SELECT e.id, e.name, e.last_name, e.email, e.branch_id, b.name AS branch_name
    FROM employees e
    JOIN branches b ON b.id = e.branch_id
"#;

#[derive(Clone)]
pub struct EmployeesRepository {
    pool: Pool<Postgres>,
}

impl EmployeesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<EmployeeDetails>> {
        let rows = sqlx::query_as::<_, EmployeeDetails>(&format!(
            "{} ORDER BY e.last_name, e.name",
            SELECT_EMPLOYEE
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<EmployeeDetails> {
        sqlx::query_as::<_, EmployeeDetails>(&format!("{} WHERE e.id = $1", SELECT_EMPLOYEE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }

    pub async fn create(&self, data: &EmployeeRequest) -> AppResult<EmployeeDetails> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO employees (name, last_name, email, branch_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(data.branch_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_write)?;

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i32, data: &EmployeeRequest) -> AppResult<EmployeeDetails> {
        let result = sqlx::query(
            r#"
            UPDATE employees SET name = $1, last_name = $2, email = $3, branch_id = $4
            WHERE id = $5
            "#,
        )
        .bind(&data.name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(data.branch_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::from_write)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }
        self.get_by_id(id).await
    }

    /// Delete an employee together with their loans.
    ///
    /// Devices still out on an active loan are released first, the same way
    /// deleting a single active loan does.
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;

        let released = sqlx::query(
            r#"
            UPDATE devices SET available = TRUE
            WHERE id IN (SELECT device_id FROM loans WHERE employee_id = $1 AND NOT returned)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_write)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }

        tx.commit().await?;
        Ok(released)
    }
}
