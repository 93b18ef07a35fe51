//! Business logic services

pub mod branches;
pub mod device_types;
pub mod devices;
pub mod employees;
pub mod loan_engine;
pub mod loans;
pub mod producers;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
};

pub const NAME_MAX_LEN: usize = 100;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub branches: branches::BranchesService,
    pub producers: producers::ProducersService,
    pub device_types: device_types::DeviceTypesService,
    pub employees: employees::EmployeesService,
    pub devices: devices::DevicesService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            branches: branches::BranchesService::new(repository.clone()),
            producers: producers::ProducersService::new(repository.clone()),
            device_types: device_types::DeviceTypesService::new(repository.clone()),
            employees: employees::EmployeesService::new(repository.clone()),
            devices: devices::DevicesService::new(Arc::new(repository.devices.clone())),
            loans: loans::LoansService::new(Arc::new(repository.loans)),
        }
    }
}

/// Trim a display name and check it is non-empty and at most 100 characters
pub fn normalize_name(field: &str, raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, NAME_MAX_LEN
        )));
    }
    Ok(name.to_string())
}
