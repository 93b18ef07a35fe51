//! Employee management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::employee::{EmployeeDetails, EmployeeRequest},
    repository::Repository,
    services::normalize_name,
};

#[derive(Clone)]
pub struct EmployeesService {
    repository: Repository,
}

impl EmployeesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<EmployeeDetails>> {
        self.repository.employees.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<EmployeeDetails> {
        self.repository.employees.get_by_id(id).await
    }

    pub async fn create(&self, data: &EmployeeRequest) -> AppResult<EmployeeDetails> {
        let data = self.prepare(data).await?;
        let employee = self.repository.employees.create(&data).await?;
        tracing::info!("Employee {} created", employee.id);
        Ok(employee)
    }

    pub async fn update(&self, id: i32, data: &EmployeeRequest) -> AppResult<EmployeeDetails> {
        self.repository.employees.get_by_id(id).await?;
        let data = self.prepare(data).await?;
        self.repository.employees.update(id, &data).await
    }

    /// Delete an employee and their loan history
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let released = self.repository.employees.delete(id).await?;
        tracing::info!("Employee {} deleted, {} device(s) released", id, released);
        Ok(())
    }

    async fn prepare(&self, data: &EmployeeRequest) -> AppResult<EmployeeRequest> {
        let data = normalize_employee(data)?;
        if !self.repository.branches.exists(data.branch_id).await? {
            return Err(AppError::Validation(format!(
                "Branch {} does not exist",
                data.branch_id
            )));
        }
        Ok(data)
    }
}

/// Trim every text field and re-check the limits on the trimmed values
fn normalize_employee(data: &EmployeeRequest) -> AppResult<EmployeeRequest> {
    let normalized = EmployeeRequest {
        name: normalize_name("Name", &data.name)?,
        last_name: normalize_name("Last name", &data.last_name)?,
        email: data.email.trim().to_string(),
        branch_id: data.branch_id,
    };
    normalized.validate()?;
    Ok(normalized)
}
