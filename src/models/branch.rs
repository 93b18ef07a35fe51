//! Branch (office location) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Branch record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Branch {
    pub id: i32,
    pub name: String,
}

/// Create or replace a branch
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BranchRequest {
    #[validate(length(min = 1, max = 100, message = "Branch name must be 1-100 characters"))]
    pub name: String,
}
