//! Loan management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::loan::{CreateLoan, LoanDetails, UpdateLoan},
};

/// List every loan, returned or not
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    responses(
        (status = 200, description = "All loans", body = Vec<LoanDetails>)
    )
)]
pub async fn list_loans(State(state): State<crate::AppState>) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.list().await?;
    Ok(Json(loans))
}

/// List loans that have not been returned
#[utoipa::path(
    get,
    path = "/loans/active",
    tag = "loans",
    responses(
        (status = 200, description = "Active loans", body = Vec<LoanDetails>)
    )
)]
pub async fn list_active_loans(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.all_active().await?;
    Ok(Json(loans))
}

/// Get loan by ID
#[utoipa::path(
    get,
    path = "/loans/{id}",
    tag = "loans",
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Loan details", body = LoanDetails),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LoanDetails>> {
    let loan = state.services.loans.get_by_id(id).await?;
    Ok(Json(loan))
}

/// Lend a device to an employee
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = CreateLoan,
    responses(
        (status = 201, description = "Loan created", body = LoanDetails),
        (status = 404, description = "Employee or device not found"),
        (status = 409, description = "Device not available")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateLoan>,
) -> AppResult<(StatusCode, Json<LoanDetails>)> {
    data.validate()?;
    let loan = state.services.loans.issue(&data).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Return a borrowed device
#[utoipa::path(
    post,
    path = "/loans/{id}/return",
    tag = "loans",
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Loan returned", body = LoanDetails),
        (status = 404, description = "Loan not found"),
        (status = 409, description = "Loan already returned")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LoanDetails>> {
    let loan = state.services.loans.return_loan(id).await?;
    Ok(Json(loan))
}

/// Overwrite the return fields of a loan
#[utoipa::path(
    put,
    path = "/loans/{id}",
    tag = "loans",
    params(("id" = i32, Path, description = "Loan ID")),
    request_body = UpdateLoan,
    responses(
        (status = 200, description = "Loan updated", body = LoanDetails),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn update_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateLoan>,
) -> AppResult<Json<LoanDetails>> {
    let loan = state.services.loans.update(id, &data).await?;
    Ok(Json(loan))
}

/// Delete a loan record
#[utoipa::path(
    delete,
    path = "/loans/{id}",
    tag = "loans",
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 204, description = "Loan deleted"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn delete_loan(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.loans.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Loans an employee currently holds
#[utoipa::path(
    get,
    path = "/employees/{id}/loans/active",
    tag = "loans",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee's active loans", body = Vec<LoanDetails>),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee_active_loans(
    State(state): State<crate::AppState>,
    Path(employee_id): Path<i32>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.active_for_employee(employee_id).await?;
    Ok(Json(loans))
}

/// Loans an employee has returned
#[utoipa::path(
    get,
    path = "/employees/{id}/loans/history",
    tag = "loans",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee's returned loans", body = Vec<LoanDetails>),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee_loan_history(
    State(state): State<crate::AppState>,
    Path(employee_id): Path<i32>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.history_for_employee(employee_id).await?;
    Ok(Json(loans))
}
