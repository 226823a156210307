use std::collections::HashMap;

use tokio::sync::RwLock;

use staffdesk_core::domain::change_request::ChangeRequest;
use staffdesk_core::domain::employee::{EmpCode, EmployeeRecord};

use super::{ChangeRequestRepository, EmployeeRepository, RepositoryError};

#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    employees: RwLock<HashMap<String, EmployeeRecord>>,
}

impl InMemoryEmployeeRepository {
    pub fn with_employees(employees: impl IntoIterator<Item = EmployeeRecord>) -> Self {
        let employees = employees
            .into_iter()
            .map(|employee| (employee.emp_code.0.clone(), employee))
            .collect::<HashMap<_, _>>();
        Self { employees: RwLock::new(employees) }
    }
}

#[async_trait::async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_by_code(
        &self,
        code: &EmpCode,
    ) -> Result<Option<EmployeeRecord>, RepositoryError> {
        let employees = self.employees.read().await;
        Ok(employees.get(&code.0).cloned())
    }

    async fn save(&self, employee: EmployeeRecord) -> Result<(), RepositoryError> {
        let mut employees = self.employees.write().await;
        employees.insert(employee.emp_code.0.clone(), employee);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryChangeRequestRepository {
    requests: RwLock<Vec<ChangeRequest>>,
}

impl InMemoryChangeRequestRepository {
    pub async fn all(&self) -> Vec<ChangeRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait::async_trait]
impl ChangeRequestRepository for InMemoryChangeRequestRepository {
    async fn insert(&self, request: ChangeRequest) -> Result<(), RepositoryError> {
        let mut requests = self.requests.write().await;
        requests.push(request);
        Ok(())
    }

    async fn list_for_employee(
        &self,
        code: &EmpCode,
    ) -> Result<Vec<ChangeRequest>, RepositoryError> {
        let requests = self.requests.read().await;
        Ok(requests.iter().filter(|request| &request.emp_code == code).cloned().collect())
    }
}
