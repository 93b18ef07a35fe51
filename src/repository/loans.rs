//! Loans repository: the Postgres side of the loan unit of work

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        device::Device,
        loan::{Loan, LoanDetails, LoanFilter, NewLoan},
    },
    services::loan_engine::{LoanLedger, LoanUnit},
};

const SELECT_LOAN_DETAILS: &str = r#"
    SELECT l.id, e.name AS employee_name, e.last_name AS employee_last_name,
           d.serial_number AS device_serial_number,
           l.loan_date, l.return_date, l.returned
    FROM loans l
    JOIN employees e ON e.id = l.employee_id
    JOIN devices d ON d.id = l.device_id
"#;

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanLedger for LoansRepository {
    async fn begin(&self) -> AppResult<Box<dyn LoanUnit>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgLoanUnit { tx: Some(tx) }))
    }
}

/// One database transaction; rolled back if dropped before `commit`
pub struct PgLoanUnit {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgLoanUnit {
    fn conn(&mut self) -> AppResult<&mut PgConnection> {
        self.tx
            .as_deref_mut()
            .ok_or_else(|| AppError::Internal("Loan unit of work already committed".to_string()))
    }
}

#[async_trait]
impl LoanUnit for PgLoanUnit {
    async fn device(&mut self, id: i32) -> AppResult<Option<Device>> {
        // Row lock held until commit: concurrent issues of one device serialize here
        let device = sqlx::query_as::<_, Device>(
            "SELECT id, type_id, producer_id, serial_number, available FROM devices WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(self.conn()?)
        .await?;
        Ok(device)
    }

    async fn set_device_availability(&mut self, id: i32, available: bool) -> AppResult<()> {
        sqlx::query("UPDATE devices SET available = $1 WHERE id = $2")
            .bind(available)
            .bind(id)
            .execute(self.conn()?)
            .await
            .map_err(AppError::from_write)?;
        Ok(())
    }

    async fn employee_exists(&mut self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)")
            .bind(id)
            .fetch_one(self.conn()?)
            .await?;
        Ok(exists)
    }

    async fn loan(&mut self, id: i32) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(
            "SELECT id, employee_id, device_id, loan_date, return_date, returned FROM loans WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(self.conn()?)
        .await?;
        Ok(loan)
    }

    async fn insert_loan(&mut self, loan: &NewLoan) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (employee_id, device_id, loan_date, return_date, returned)
            VALUES ($1, $2, $3, NULL, FALSE)
            RETURNING id, employee_id, device_id, loan_date, return_date, returned
            "#,
        )
        .bind(loan.employee_id)
        .bind(loan.device_id)
        .bind(loan.loan_date)
        .fetch_one(self.conn()?)
        .await
        .map_err(AppError::from_write)
    }

    async fn save_loan_status(
        &mut self,
        id: i32,
        returned: bool,
        return_date: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        sqlx::query("UPDATE loans SET returned = $1, return_date = $2 WHERE id = $3")
            .bind(returned)
            .bind(return_date)
            .bind(id)
            .execute(self.conn()?)
            .await
            .map_err(AppError::from_write)?;
        Ok(())
    }

    async fn remove_loan(&mut self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(id)
            .execute(self.conn()?)
            .await
            .map_err(AppError::from_write)?;
        Ok(())
    }

    async fn loan_details(&mut self, filter: LoanFilter) -> AppResult<Vec<LoanDetails>> {
        let conn = self.conn()?;
        let rows = match filter {
            LoanFilter::One(id) => {
                sqlx::query_as::<_, LoanDetails>(&format!("{} WHERE l.id = $1", SELECT_LOAN_DETAILS))
                    .bind(id)
                    .fetch_all(conn)
                    .await?
            }
            LoanFilter::All => {
                sqlx::query_as::<_, LoanDetails>(&format!("{} ORDER BY l.id", SELECT_LOAN_DETAILS))
                    .fetch_all(conn)
                    .await?
            }
            LoanFilter::Active => {
                sqlx::query_as::<_, LoanDetails>(&format!(
                    "{} WHERE NOT l.returned ORDER BY l.loan_date",
                    SELECT_LOAN_DETAILS
                ))
                .fetch_all(conn)
                .await?
            }
            LoanFilter::Employee { employee_id, returned } => {
                sqlx::query_as::<_, LoanDetails>(&format!(
                    "{} WHERE l.employee_id = $1 AND l.returned = $2 ORDER BY l.loan_date",
                    SELECT_LOAN_DETAILS
                ))
                .bind(employee_id)
                .bind(returned)
                .fetch_all(conn)
                .await?
            }
        };
        Ok(rows)
    }

    async fn commit(&mut self) -> AppResult<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| AppError::Internal("Loan unit of work already committed".to_string()))?;
        tx.commit().await?;
        Ok(())
    }
}
