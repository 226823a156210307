pub mod config;
pub mod domain;
pub mod errors;

pub use domain::change_request::{ChangeRequest, ChangeRequestId, ChangeRequestStatus};
pub use domain::employee::{EmpCode, EmployeeRecord};
pub use errors::{ApplicationError, DomainError};
