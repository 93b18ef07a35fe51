//! Repository layer for database operations

pub mod branches;
pub mod device_types;
pub mod devices;
pub mod employees;
pub mod loans;
pub mod producers;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub branches: branches::BranchesRepository,
    pub producers: producers::ProducersRepository,
    pub device_types: device_types::DeviceTypesRepository,
    pub employees: employees::EmployeesRepository,
    pub devices: devices::DevicesRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            branches: branches::BranchesRepository::new(pool.clone()),
            producers: producers::ProducersRepository::new(pool.clone()),
            device_types: device_types::DeviceTypesRepository::new(pool.clone()),
            employees: employees::EmployeesRepository::new(pool.clone()),
            devices: devices::DevicesRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
