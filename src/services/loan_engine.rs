//! Loan lifecycle rules.
//!
//! A loan is `ACTIVE` until returned, then `RETURNED` for good. The device
//! it references must be unavailable exactly while an active loan holds it.
//! Every operation works through a [`LoanUnit`]: reads, the loan write and
//! the device availability write all land in the same unit of work, so a
//! caller that drops the unit without committing leaves nothing behind.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult, ConflictKind},
    models::{
        device::Device,
        loan::{Loan, LoanDetails, LoanFilter, NewLoan, UpdateLoan},
    },
};

/// Opens units of work over the loan and device tables
#[async_trait]
pub trait LoanLedger: Send + Sync {
    async fn begin(&self) -> AppResult<Box<dyn LoanUnit>>;
}

/// What the loan engine may touch inside one unit of work
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanUnit: Send {
    async fn device(&mut self, id: i32) -> AppResult<Option<Device>>;
    async fn set_device_availability(&mut self, id: i32, available: bool) -> AppResult<()>;
    async fn employee_exists(&mut self, id: i32) -> AppResult<bool>;

    async fn loan(&mut self, id: i32) -> AppResult<Option<Loan>>;
    async fn insert_loan(&mut self, loan: &NewLoan) -> AppResult<Loan>;
    async fn save_loan_status(
        &mut self,
        id: i32,
        returned: bool,
        return_date: Option<DateTime<Utc>>,
    ) -> AppResult<()>;
    async fn remove_loan(&mut self, id: i32) -> AppResult<()>;

    /// Denormalized read views, resolved at read time
    async fn loan_details(&mut self, filter: LoanFilter) -> AppResult<Vec<LoanDetails>>;

    /// Make every write of this unit visible at once
    async fn commit(&mut self) -> AppResult<()>;
}

fn loan_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Loan {} not found", id))
}

fn employee_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Employee {} does not exist", id))
}

/// Lend a device to an employee.
///
/// Both preconditions are checked before anything is written.
pub async fn issue<U: LoanUnit + ?Sized>(
    unit: &mut U,
    employee_id: i32,
    device_id: i32,
    now: DateTime<Utc>,
) -> AppResult<Loan> {
    let device = unit
        .device(device_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Device {} not found", device_id)))?;

    if !device.available {
        tracing::warn!("Refused loan of unavailable device {}", device.id);
        return Err(AppError::Conflict(
            ConflictKind::DeviceUnavailable,
            format!("Device {} is not available", device.serial_number),
        ));
    }

    if !unit.employee_exists(employee_id).await? {
        return Err(employee_not_found(employee_id));
    }

    unit.set_device_availability(device.id, false).await?;
    unit.insert_loan(&NewLoan {
        employee_id,
        device_id: device.id,
        loan_date: now,
    })
    .await
}

/// Close an active loan and release its device.
///
/// Not idempotent: a loan that is already returned is rejected and keeps
/// its original return date.
pub async fn return_loan<U: LoanUnit + ?Sized>(
    unit: &mut U,
    loan_id: i32,
    now: DateTime<Utc>,
) -> AppResult<Loan> {
    let mut loan = unit.loan(loan_id).await?.ok_or_else(|| loan_not_found(loan_id))?;

    if loan.returned {
        tracing::warn!("Refused second return of loan {}", loan_id);
        return Err(AppError::Conflict(
            ConflictKind::AlreadyReturned,
            format!("Loan {} was already returned", loan_id),
        ));
    }

    let device = unit.device(loan.device_id).await?.ok_or_else(|| {
        AppError::NotFound(format!("Device {} of loan {} not found", loan.device_id, loan_id))
    })?;

    loan.returned = true;
    loan.return_date = Some(now);

    unit.save_loan_status(loan.id, loan.returned, loan.return_date).await?;
    unit.set_device_availability(device.id, true).await?;
    Ok(loan)
}

/// Remove a loan in any state. Deleting an active loan releases its device.
pub async fn delete<U: LoanUnit + ?Sized>(unit: &mut U, loan_id: i32) -> AppResult<Loan> {
    let loan = unit.loan(loan_id).await?.ok_or_else(|| loan_not_found(loan_id))?;

    if loan.is_active() {
        if let Some(device) = unit.device(loan.device_id).await? {
            unit.set_device_availability(device.id, true).await?;
        }
    }

    unit.remove_loan(loan.id).await?;
    Ok(loan)
}

/// Overwrite `returned` and `return_date` verbatim.
///
/// Unlike [`return_loan`] there is no state guard. Closing an active loan
/// releases the device; clearing `returned` does not take the device back.
/// Patching a loan that was already returned never touches the device, which
/// may be out on a newer loan by now.
pub async fn update<U: LoanUnit + ?Sized>(
    unit: &mut U,
    loan_id: i32,
    patch: &UpdateLoan,
) -> AppResult<Loan> {
    let mut loan = unit.loan(loan_id).await?.ok_or_else(|| loan_not_found(loan_id))?;
    let was_active = loan.is_active();

    loan.returned = patch.returned;
    loan.return_date = patch.return_date;
    unit.save_loan_status(loan.id, loan.returned, loan.return_date).await?;

    if was_active && loan.returned {
        if let Some(device) = unit.device(loan.device_id).await? {
            unit.set_device_availability(device.id, true).await?;
        }
    }

    Ok(loan)
}

/// Active loans of one employee; the employee must exist
pub async fn active_for_employee<U: LoanUnit + ?Sized>(
    unit: &mut U,
    employee_id: i32,
) -> AppResult<Vec<LoanDetails>> {
    employee_loans(unit, employee_id, false).await
}

/// Returned loans of one employee; the employee must exist
pub async fn history_for_employee<U: LoanUnit + ?Sized>(
    unit: &mut U,
    employee_id: i32,
) -> AppResult<Vec<LoanDetails>> {
    employee_loans(unit, employee_id, true).await
}

async fn employee_loans<U: LoanUnit + ?Sized>(
    unit: &mut U,
    employee_id: i32,
    returned: bool,
) -> AppResult<Vec<LoanDetails>> {
    if !unit.employee_exists(employee_id).await? {
        return Err(employee_not_found(employee_id));
    }
    unit.loan_details(LoanFilter::Employee { employee_id, returned }).await
}

/// Every active loan
pub async fn all_active<U: LoanUnit + ?Sized>(unit: &mut U) -> AppResult<Vec<LoanDetails>> {
    unit.loan_details(LoanFilter::Active).await
}

/// Read view of a single loan
pub async fn details<U: LoanUnit + ?Sized>(unit: &mut U, loan_id: i32) -> AppResult<LoanDetails> {
    unit.loan_details(LoanFilter::One(loan_id))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| loan_not_found(loan_id))
}
