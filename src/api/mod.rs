//! API handlers for EMS REST endpoints

pub mod branches;
pub mod device_types;
pub mod devices;
pub mod employees;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod producers;
