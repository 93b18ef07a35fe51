//! Employee model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Employee row as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub branch_id: i32,
}

/// Employee with its branch name resolved
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    pub id: i32,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub branch_id: i32,
    pub branch_name: String,
}

/// Create or replace an employee
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,
    #[validate(
        email(message = "Invalid email format"),
        length(max = 300, message = "Email must be at most 300 characters")
    )]
    pub email: String,
    #[validate(range(min = 1, message = "Branch is required"))]
    pub branch_id: i32,
}
