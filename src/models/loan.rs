//! Loan model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Loan row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Loan {
    pub id: i32,
    pub employee_id: i32,
    pub device_id: i32,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub returned: bool,
}

impl Loan {
    pub fn is_active(&self) -> bool {
        !self.returned
    }
}

/// Loan about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLoan {
    pub employee_id: i32,
    pub device_id: i32,
    pub loan_date: DateTime<Utc>,
}

/// Loan with employee and device display fields resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    pub id: i32,
    pub employee_name: String,
    pub employee_last_name: String,
    pub device_serial_number: String,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub returned: bool,
}

/// Issue a device to an employee
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoan {
    #[validate(range(min = 1, message = "Employee is required"))]
    pub employee_id: i32,
    #[validate(range(min = 1, message = "Device is required"))]
    pub device_id: i32,
}

/// Direct patch of the return fields
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLoan {
    pub return_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub returned: bool,
}

/// Row selection for loan listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanFilter {
    One(i32),
    All,
    Active,
    /// Loans of one employee, either still out or already returned
    Employee { employee_id: i32, returned: bool },
}

impl LoanFilter {
    pub fn matches(&self, loan: &Loan) -> bool {
        match *self {
            LoanFilter::One(id) => loan.id == id,
            LoanFilter::All => true,
            LoanFilter::Active => !loan.returned,
            LoanFilter::Employee { employee_id, returned } => {
                loan.employee_id == employee_id && loan.returned == returned
            }
        }
    }
}
