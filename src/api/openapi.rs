//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{branches, device_types, devices, employees, health, loans, producers};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EMS API",
        version = "1.0.0",
        description = "Equipment Management System REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Branches
        branches::list_branches,
        branches::get_branch,
        branches::create_branch,
        branches::update_branch,
        branches::delete_branch,
        // Producers
        producers::list_producers,
        producers::get_producer,
        producers::create_producer,
        producers::update_producer,
        producers::delete_producer,
        // Device types
        device_types::list_device_types,
        device_types::get_device_type,
        device_types::create_device_type,
        device_types::update_device_type,
        device_types::delete_device_type,
        // Employees
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        // Devices
        devices::list_devices,
        devices::list_available_devices,
        devices::list_devices_by_producer,
        devices::list_devices_by_type,
        devices::get_device,
        devices::create_device,
        devices::update_device,
        devices::delete_device,
        // Loans
        loans::list_loans,
        loans::list_active_loans,
        loans::get_loan,
        loans::create_loan,
        loans::return_loan,
        loans::update_loan,
        loans::delete_loan,
        loans::get_employee_active_loans,
        loans::get_employee_loan_history,
    ),
    components(
        schemas(
            crate::models::branch::Branch,
            crate::models::branch::BranchRequest,
            crate::models::producer::Producer,
            crate::models::producer::ProducerRequest,
            crate::models::device_type::DeviceType,
            crate::models::device_type::DeviceTypeRequest,
            crate::models::employee::EmployeeDetails,
            crate::models::employee::EmployeeRequest,
            crate::models::device::DeviceDetails,
            crate::models::device::DeviceRequest,
            crate::models::loan::LoanDetails,
            crate::models::loan::CreateLoan,
            crate::models::loan::UpdateLoan,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "branches", description = "Branch management"),
        (name = "producers", description = "Producer management"),
        (name = "device-types", description = "Device type management"),
        (name = "employees", description = "Employee management"),
        (name = "devices", description = "Device inventory"),
        (name = "loans", description = "Loan lifecycle")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
