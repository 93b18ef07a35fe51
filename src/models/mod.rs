//! Data models for EMS

pub mod branch;
pub mod device;
pub mod device_type;
pub mod employee;
pub mod loan;
pub mod producer;

// Re-export commonly used types
pub use branch::Branch;
pub use device::{Device, DeviceDetails, DeviceFilter};
pub use device_type::DeviceType;
pub use employee::{Employee, EmployeeDetails};
pub use loan::{Loan, LoanDetails, LoanFilter};
pub use producer::Producer;
