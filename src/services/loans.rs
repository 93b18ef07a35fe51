//! Loan management service

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::AppResult,
    models::loan::{CreateLoan, LoanDetails, LoanFilter, UpdateLoan},
    services::loan_engine::{self, LoanLedger},
};

#[derive(Clone)]
pub struct LoansService {
    ledger: Arc<dyn LoanLedger>,
}

impl LoansService {
    pub fn new(ledger: Arc<dyn LoanLedger>) -> Self {
        Self { ledger }
    }

    /// Issue a device to an employee
    pub async fn issue(&self, data: &CreateLoan) -> AppResult<LoanDetails> {
        let mut unit = self.ledger.begin().await?;
        let loan =
            loan_engine::issue(unit.as_mut(), data.employee_id, data.device_id, Utc::now()).await?;
        let view = loan_engine::details(unit.as_mut(), loan.id).await?;
        unit.commit().await?;

        tracing::info!(
            "Loan {} issued: device {} to employee {}",
            loan.id,
            loan.device_id,
            loan.employee_id
        );
        Ok(view)
    }

    /// Return a borrowed device
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<LoanDetails> {
        let mut unit = self.ledger.begin().await?;
        let loan = loan_engine::return_loan(unit.as_mut(), loan_id, Utc::now()).await?;
        let view = loan_engine::details(unit.as_mut(), loan.id).await?;
        unit.commit().await?;

        tracing::info!("Loan {} returned, device {} released", loan.id, loan.device_id);
        Ok(view)
    }

    /// Delete a loan record
    pub async fn delete(&self, loan_id: i32) -> AppResult<()> {
        let mut unit = self.ledger.begin().await?;
        let loan = loan_engine::delete(unit.as_mut(), loan_id).await?;
        unit.commit().await?;

        tracing::info!("Loan {} deleted (was active: {})", loan.id, loan.is_active());
        Ok(())
    }

    /// Overwrite the return fields of a loan
    pub async fn update(&self, loan_id: i32, patch: &UpdateLoan) -> AppResult<LoanDetails> {
        let mut unit = self.ledger.begin().await?;
        let loan = loan_engine::update(unit.as_mut(), loan_id, patch).await?;
        let view = loan_engine::details(unit.as_mut(), loan.id).await?;
        unit.commit().await?;

        tracing::info!("Loan {} updated (returned: {})", loan.id, loan.returned);
        Ok(view)
    }

    /// Read-only: the unit is dropped without commit, which rolls it back
    pub async fn get_by_id(&self, loan_id: i32) -> AppResult<LoanDetails> {
        let mut unit = self.ledger.begin().await?;
        loan_engine::details(unit.as_mut(), loan_id).await
    }

    pub async fn list(&self) -> AppResult<Vec<LoanDetails>> {
        let mut unit = self.ledger.begin().await?;
        unit.loan_details(LoanFilter::All).await
    }

    /// Every loan that has not been returned
    pub async fn all_active(&self) -> AppResult<Vec<LoanDetails>> {
        let mut unit = self.ledger.begin().await?;
        loan_engine::all_active(unit.as_mut()).await
    }

    /// Loans an employee still holds
    pub async fn active_for_employee(&self, employee_id: i32) -> AppResult<Vec<LoanDetails>> {
        let mut unit = self.ledger.begin().await?;
        loan_engine::active_for_employee(unit.as_mut(), employee_id).await
    }

    /// Loans an employee has returned
    pub async fn history_for_employee(&self, employee_id: i32) -> AppResult<Vec<LoanDetails>> {
        let mut unit = self.ledger.begin().await?;
        loan_engine::history_for_employee(unit.as_mut(), employee_id).await
    }
}
