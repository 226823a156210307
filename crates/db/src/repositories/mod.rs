use async_trait::async_trait;
use thiserror::Error;

use staffdesk_core::domain::change_request::ChangeRequest;
use staffdesk_core::domain::employee::{EmpCode, EmployeeRecord};

pub mod change_request;
pub mod employee;
pub mod memory;

pub use change_request::SqlChangeRequestRepository;
pub use employee::SqlEmployeeRepository;
pub use memory::{InMemoryChangeRequestRepository, InMemoryEmployeeRepository};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_code(&self, code: &EmpCode)
        -> Result<Option<EmployeeRecord>, RepositoryError>;
    async fn save(&self, employee: EmployeeRecord) -> Result<(), RepositoryError>;
}

/// Append-only log of proposed field changes.
#[async_trait]
pub trait ChangeRequestRepository: Send + Sync {
    async fn insert(&self, request: ChangeRequest) -> Result<(), RepositoryError>;
    async fn list_for_employee(
        &self,
        code: &EmpCode,
    ) -> Result<Vec<ChangeRequest>, RepositoryError>;
}
