//! Branch endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::branch::{Branch, BranchRequest},
};

/// List all branches
#[utoipa::path(
    get,
    path = "/branches",
    tag = "branches",
    responses(
        (status = 200, description = "Branch list", body = Vec<Branch>)
    )
)]
pub async fn list_branches(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Branch>>> {
    let branches = state.services.branches.list().await?;
    Ok(Json(branches))
}

/// Get branch by ID
#[utoipa::path(
    get,
    path = "/branches/{id}",
    tag = "branches",
    params(("id" = i32, Path, description = "Branch ID")),
    responses(
        (status = 200, description = "Branch details", body = Branch),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn get_branch(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Branch>> {
    let branch = state.services.branches.get_by_id(id).await?;
    Ok(Json(branch))
}

/// Create branch
#[utoipa::path(
    post,
    path = "/branches",
    tag = "branches",
    request_body = BranchRequest,
    responses(
        (status = 201, description = "Branch created", body = Branch),
        (status = 400, description = "Invalid name")
    )
)]
pub async fn create_branch(
    State(state): State<crate::AppState>,
    Json(data): Json<BranchRequest>,
) -> AppResult<(StatusCode, Json<Branch>)> {
    data.validate()?;
    let branch = state.services.branches.create(&data).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

/// Rename branch
#[utoipa::path(
    put,
    path = "/branches/{id}",
    tag = "branches",
    params(("id" = i32, Path, description = "Branch ID")),
    request_body = BranchRequest,
    responses(
        (status = 200, description = "Branch updated", body = Branch),
        (status = 404, description = "Branch not found")
    )
)]
pub async fn update_branch(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<BranchRequest>,
) -> AppResult<Json<Branch>> {
    data.validate()?;
    let branch = state.services.branches.update(id, &data).await?;
    Ok(Json(branch))
}

/// Delete branch
#[utoipa::path(
    delete,
    path = "/branches/{id}",
    tag = "branches",
    params(("id" = i32, Path, description = "Branch ID")),
    responses(
        (status = 204, description = "Branch deleted"),
        (status = 404, description = "Branch not found"),
        (status = 409, description = "Employees still belong to the branch")
    )
)]
pub async fn delete_branch(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.branches.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
