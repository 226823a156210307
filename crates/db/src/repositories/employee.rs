use std::collections::BTreeMap;

use chrono::Utc;
use sqlx::Row;

use staffdesk_core::domain::employee::{EmpCode, EmployeeRecord};

use super::{EmployeeRepository, RepositoryError};
use crate::DbPool;

pub struct SqlEmployeeRepository {
    pool: DbPool,
}

impl SqlEmployeeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_employee(row: &sqlx::sqlite::SqliteRow) -> Result<EmployeeRecord, RepositoryError> {
    let emp_code: String =
        row.try_get("emp_code").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let name: String = row.try_get("name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let email: String = row.try_get("email").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let department: String =
        row.try_get("department").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let shift: String = row.try_get("shift").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let attributes_json: String =
        row.try_get("attributes_json").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let attributes = serde_json::from_str::<BTreeMap<String, String>>(&attributes_json)
        .map_err(|e| {
            RepositoryError::Decode(format!("attributes for employee `{emp_code}`: {e}"))
        })?;

    Ok(EmployeeRecord { emp_code: EmpCode(emp_code), name, email, department, shift, attributes })
}

#[async_trait::async_trait]
impl EmployeeRepository for SqlEmployeeRepository {
    async fn find_by_code(
        &self,
        code: &EmpCode,
    ) -> Result<Option<EmployeeRecord>, RepositoryError> {
        let row = sqlx::query(
            "SELECT emp_code, name, email, department, shift, attributes_json
             FROM employee WHERE emp_code = ?",
        )
        .bind(&code.0)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_employee(r)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, employee: EmployeeRecord) -> Result<(), RepositoryError> {
        let attributes_json = serde_json::to_string(&employee.attributes)
            .map_err(|e| RepositoryError::Decode(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO employee (emp_code, name, email, department, shift, attributes_json,
                                   created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(emp_code) DO UPDATE SET
                 name = excluded.name,
                 email = excluded.email,
                 department = excluded.department,
                 shift = excluded.shift,
                 attributes_json = excluded.attributes_json,
                 updated_at = excluded.updated_at",
        )
        .bind(&employee.emp_code.0)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(&employee.shift)
        .bind(&attributes_json)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
