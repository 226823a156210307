use std::collections::BTreeMap;

use staffdesk_core::domain::employee::{EmpCode, EmployeeRecord};
use tracing::info;

use crate::connection::DbPool;
use crate::repositories::{EmployeeRepository, RepositoryError, SqlEmployeeRepository};

struct SeedEmployee {
    emp_code: &'static str,
    name: &'static str,
    email: &'static str,
    department: &'static str,
    shift: &'static str,
    attributes: &'static [(&'static str, &'static str)],
}

const SEED_EMPLOYEES: &[SeedEmployee] = &[
    SeedEmployee {
        emp_code: "EMP001",
        name: "Rishal Mundekkat",
        email: "rishal@example.com",
        department: "Engineering",
        shift: "day",
        attributes: &[("location", "Kochi")],
    },
    SeedEmployee {
        emp_code: "EMP002",
        name: "Meera Nair",
        email: "meera.nair@example.com",
        department: "Finance",
        shift: "day",
        attributes: &[("location", "Bengaluru"), ("phone", "+91-80-5550-0102")],
    },
    SeedEmployee {
        emp_code: "EMP003",
        name: "Daniel Okafor",
        email: "daniel.okafor@example.com",
        department: "Support",
        shift: "night",
        attributes: &[],
    },
];

/// Deterministic demo employees used by `staffdesk seed` and the CLI tests.
pub struct DemoDirectory;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedResult {
    pub employees_seeded: Vec<EmpCode>,
}

impl DemoDirectory {
    pub fn employees() -> Vec<EmployeeRecord> {
        SEED_EMPLOYEES
            .iter()
            .map(|seed| EmployeeRecord {
                emp_code: EmpCode(seed.emp_code.to_string()),
                name: seed.name.to_string(),
                email: seed.email.to_string(),
                department: seed.department.to_string(),
                shift: seed.shift.to_string(),
                attributes: seed
                    .attributes
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect::<BTreeMap<_, _>>(),
            })
            .collect()
    }

    /// Upserts the demo employees. Re-running leaves the same rows in place.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let repo = SqlEmployeeRepository::new(pool.clone());
        let mut employees_seeded = Vec::with_capacity(SEED_EMPLOYEES.len());

        for employee in Self::employees() {
            employees_seeded.push(employee.emp_code.clone());
            repo.save(employee).await?;
        }

        info!(
            event_name = "db.fixtures.seeded",
            employee_count = employees_seeded.len(),
            "demo employees seeded"
        );

        Ok(SeedResult { employees_seeded })
    }

    /// Returns the demo codes that are missing from the store.
    pub async fn verify(pool: &DbPool) -> Result<Vec<EmpCode>, RepositoryError> {
        let repo = SqlEmployeeRepository::new(pool.clone());
        let mut missing = Vec::new();

        for seed in SEED_EMPLOYEES {
            let code = EmpCode(seed.emp_code.to_string());
            if repo.find_by_code(&code).await?.is_none() {
                missing.push(code);
            }
        }

        Ok(missing)
    }
}
