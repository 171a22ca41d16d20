//! Service layer
//!
//! - [`EmployeeService`] - employee CRUD, paging and search

pub mod employee_service;

pub use employee_service::EmployeeService;
