//! In-memory stand-ins for the Postgres repositories, used by unit tests.
//!
//! A [`MemoryUnit`] works on a private copy of the tables and publishes it
//! on commit, which mirrors transaction semantics closely enough for
//! single-threaded tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        device::{Device, DeviceDetails, DeviceFilter, DeviceWrite},
        employee::Employee,
        loan::{Loan, LoanDetails, LoanFilter, NewLoan},
    },
    services::{
        devices::DeviceStore,
        loan_engine::{LoanLedger, LoanUnit},
    },
};

#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub producers: BTreeMap<i32, String>,
    pub device_types: BTreeMap<i32, String>,
    pub employees: BTreeMap<i32, Employee>,
    pub devices: BTreeMap<i32, Device>,
    pub loans: BTreeMap<i32, Loan>,
    /// Makes the next loan insert fail, to exercise rollback paths
    pub fail_next_insert: bool,
}

impl Tables {
    fn next_id<V>(map: &BTreeMap<i32, V>) -> i32 {
        map.keys().next_back().copied().unwrap_or(0) + 1
    }
}

#[derive(Clone, Default)]
pub struct MemoryDb {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDb {
    /// One branch, two employees, one producer and type, and three devices:
    /// `DEV-001` and `DEV-003` available, `DEV-002` withdrawn.
    pub fn seeded() -> Self {
        let db = Self::default();
        db.with(|t| {
            t.producers.insert(1, "Dell".to_string());
            t.device_types.insert(1, "Laptop".to_string());
            for (id, name, last_name) in [(1, "Jan", "Kowalski"), (2, "Anna", "Nowak")] {
                t.employees.insert(
                    id,
                    Employee {
                        id,
                        name: name.to_string(),
                        last_name: last_name.to_string(),
                        email: format!("{}.{}@ems.local", name, last_name).to_lowercase(),
                        branch_id: 1,
                    },
                );
            }
            for (id, serial, available) in [(1, "DEV-001", true), (2, "DEV-002", false), (3, "DEV-003", true)] {
                t.devices.insert(
                    id,
                    Device {
                        id,
                        type_id: 1,
                        producer_id: 1,
                        serial_number: serial.to_string(),
                        available,
                    },
                );
            }
        });
        db
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn snapshot(&self) -> Tables {
        self.lock().clone()
    }

    pub fn device(&self, id: i32) -> Device {
        self.lock().devices[&id].clone()
    }

    pub fn loan(&self, id: i32) -> Loan {
        self.lock().loans[&id].clone()
    }

    pub fn unit(&self) -> MemoryUnit {
        MemoryUnit {
            db: self.clone(),
            work: self.snapshot(),
        }
    }
}

pub struct MemoryUnit {
    db: MemoryDb,
    work: Tables,
}

impl MemoryUnit {
    /// Uncommitted state as seen from inside the unit
    pub fn work(&self) -> &Tables {
        &self.work
    }
}

#[async_trait]
impl LoanLedger for MemoryDb {
    async fn begin(&self) -> AppResult<Box<dyn LoanUnit>> {
        Ok(Box::new(self.unit()))
    }
}

#[async_trait]
impl LoanUnit for MemoryUnit {
    async fn device(&mut self, id: i32) -> AppResult<Option<Device>> {
        Ok(self.work.devices.get(&id).cloned())
    }

    async fn set_device_availability(&mut self, id: i32, available: bool) -> AppResult<()> {
        if let Some(device) = self.work.devices.get_mut(&id) {
            device.available = available;
        }
        Ok(())
    }

    async fn employee_exists(&mut self, id: i32) -> AppResult<bool> {
        Ok(self.work.employees.contains_key(&id))
    }

    async fn loan(&mut self, id: i32) -> AppResult<Option<Loan>> {
        Ok(self.work.loans.get(&id).cloned())
    }

    async fn insert_loan(&mut self, loan: &NewLoan) -> AppResult<Loan> {
        if self.work.fail_next_insert {
            self.db.with(|t| t.fail_next_insert = false);
            return Err(AppError::Internal("injected insert failure".to_string()));
        }
        let id = Tables::next_id(&self.work.loans);
        let row = Loan {
            id,
            employee_id: loan.employee_id,
            device_id: loan.device_id,
            loan_date: loan.loan_date,
            return_date: None,
            returned: false,
        };
        self.work.loans.insert(id, row.clone());
        Ok(row)
    }

    async fn save_loan_status(
        &mut self,
        id: i32,
        returned: bool,
        return_date: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        if let Some(loan) = self.work.loans.get_mut(&id) {
            loan.returned = returned;
            loan.return_date = return_date;
        }
        Ok(())
    }

    async fn remove_loan(&mut self, id: i32) -> AppResult<()> {
        self.work.loans.remove(&id);
        Ok(())
    }

    async fn loan_details(&mut self, filter: LoanFilter) -> AppResult<Vec<LoanDetails>> {
        let rows = self
            .work
            .loans
            .values()
            .filter(|loan| filter.matches(loan))
            .filter_map(|loan| {
                let employee = self.work.employees.get(&loan.employee_id)?;
                let device = self.work.devices.get(&loan.device_id)?;
                Some(LoanDetails {
                    id: loan.id,
                    employee_name: employee.name.clone(),
                    employee_last_name: employee.last_name.clone(),
                    device_serial_number: device.serial_number.clone(),
                    loan_date: loan.loan_date,
                    return_date: loan.return_date,
                    returned: loan.returned,
                })
            })
            .collect();
        Ok(rows)
    }

    async fn commit(&mut self) -> AppResult<()> {
        let work = std::mem::take(&mut self.work);
        self.db.with(|t| *t = work);
        Ok(())
    }
}

#[async_trait]
impl DeviceStore for MemoryDb {
    async fn list(&self, filter: DeviceFilter) -> AppResult<Vec<DeviceDetails>> {
        let t = self.lock();
        Ok(t.devices
            .values()
            .filter(|d| filter.matches(d))
            .map(|d| DeviceDetails {
                id: d.id,
                type_id: d.type_id,
                producer_id: d.producer_id,
                serial_number: d.serial_number.clone(),
                available: d.available,
                type_name: t.device_types.get(&d.type_id).cloned(),
                producer_name: t.producers.get(&d.producer_id).cloned(),
            })
            .collect())
    }

    async fn get(&self, id: i32) -> AppResult<Option<DeviceDetails>> {
        let all = self.list(DeviceFilter::All).await?;
        Ok(all.into_iter().find(|d| d.id == id))
    }

    async fn serial_taken(&self, serial_number: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let wanted = serial_number.to_lowercase();
        Ok(self
            .lock()
            .devices
            .values()
            .any(|d| Some(d.id) != exclude_id && d.serial_number.to_lowercase() == wanted))
    }

    async fn producer_exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.lock().producers.contains_key(&id))
    }

    async fn device_type_exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.lock().device_types.contains_key(&id))
    }

    async fn has_active_loan(&self, id: i32) -> AppResult<bool> {
        Ok(self.lock().loans.values().any(|l| l.device_id == id && !l.returned))
    }

    async fn insert(&self, device: &DeviceWrite) -> AppResult<i32> {
        let mut t = self.lock();
        let id = Tables::next_id(&t.devices);
        t.devices.insert(
            id,
            Device {
                id,
                type_id: device.type_id,
                producer_id: device.producer_id,
                serial_number: device.serial_number.clone(),
                available: device.available,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i32, device: &DeviceWrite) -> AppResult<bool> {
        let mut t = self.lock();
        let Some(row) = t.devices.get_mut(&id) else {
            return Ok(false);
        };
        row.type_id = device.type_id;
        row.producer_id = device.producer_id;
        row.serial_number = device.serial_number.clone();
        row.available = device.available;
        Ok(true)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut t = self.lock();
        t.loans.retain(|_, l| l.device_id != id);
        Ok(t.devices.remove(&id).is_some())
    }
}
