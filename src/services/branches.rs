//! Branch management service

use crate::{
    error::AppResult,
    models::branch::{Branch, BranchRequest},
    repository::Repository,
    services::normalize_name,
};

#[derive(Clone)]
pub struct BranchesService {
    repository: Repository,
}

impl BranchesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Branch>> {
        self.repository.branches.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Branch> {
        self.repository.branches.get_by_id(id).await
    }

    /// Create a branch. Branch names need not be unique.
    pub async fn create(&self, data: &BranchRequest) -> AppResult<Branch> {
        let name = normalize_name("Branch", &data.name)?;
        let branch = self.repository.branches.create(&name).await?;
        tracing::info!("Branch {} created: {}", branch.id, branch.name);
        Ok(branch)
    }

    pub async fn update(&self, id: i32, data: &BranchRequest) -> AppResult<Branch> {
        let name = normalize_name("Branch", &data.name)?;
        self.repository.branches.update(id, &name).await
    }

    /// Delete a branch that no employee belongs to
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.branches.delete(id).await?;
        tracing::info!("Branch {} deleted", id);
        Ok(())
    }
}
