use chrono::{DateTime, Utc};
use sqlx::Row;

use staffdesk_core::domain::change_request::{
    ChangeRequest, ChangeRequestId, ChangeRequestStatus,
};
use staffdesk_core::domain::employee::EmpCode;

use super::{ChangeRequestRepository, RepositoryError};
use crate::DbPool;

pub struct SqlChangeRequestRepository {
    pool: DbPool,
}

impl SqlChangeRequestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_change_request(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<ChangeRequest, RepositoryError> {
    let id: String = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let emp_code: String =
        row.try_get("emp_code").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let field: String = row.try_get("field").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let old_value: Option<String> =
        row.try_get("old_value").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let new_value: String =
        row.try_get("new_value").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let status_str: String =
        row.try_get("status").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let created_at_str: String =
        row.try_get("created_at").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let status = status_str
        .parse::<ChangeRequestStatus>()
        .map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Decode(format!("created_at `{created_at_str}`: {e}")))?;

    Ok(ChangeRequest {
        id: ChangeRequestId(id),
        emp_code: EmpCode(emp_code),
        field,
        old_value,
        new_value,
        status,
        created_at,
    })
}

#[async_trait::async_trait]
impl ChangeRequestRepository for SqlChangeRequestRepository {
    async fn insert(&self, request: ChangeRequest) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO change_request (id, emp_code, field, old_value, new_value, status,
                                         created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&request.id.0)
        .bind(&request.emp_code.0)
        .bind(&request.field)
        .bind(&request.old_value)
        .bind(&request.new_value)
        .bind(request.status.as_str())
        .bind(request.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_for_employee(
        &self,
        code: &EmpCode,
    ) -> Result<Vec<ChangeRequest>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(
            "SELECT id, emp_code, field, old_value, new_value, status, created_at
             FROM change_request WHERE emp_code = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(&code.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_change_request).collect::<Result<Vec<_>, _>>()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use staffdesk_core::domain::change_request::{ChangeRequest, ChangeRequestStatus};
    use staffdesk_core::domain::employee::{EmpCode, EmployeeRecord};

    use super::SqlChangeRequestRepository;
    use crate::repositories::{ChangeRequestRepository, EmployeeRepository, SqlEmployeeRepository};
    use crate::{connect_with_settings, migrations};

    async fn setup() -> sqlx::SqlitePool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");
        pool
    }

    /// Insert a parent employee so that FK constraints are satisfied.
    async fn insert_employee(pool: &sqlx::SqlitePool, code: &str) {
        let repo = SqlEmployeeRepository::new(pool.clone());
        repo.save(EmployeeRecord {
            emp_code: EmpCode(code.to_string()),
            name: "Test Employee".to_string(),
            email: "a@x.com".to_string(),
            department: "Operations".to_string(),
            shift: "day".to_string(),
            attributes: BTreeMap::new(),
        })
        .await
        .expect("insert parent employee");
    }

    fn pending(code: &str, field: &str, old: Option<&str>, new: &str) -> ChangeRequest {
        ChangeRequest::pending(EmpCode(code.to_string()), field, old.map(str::to_string), new)
            .expect("distinct values")
    }

    #[tokio::test]
    async fn insert_and_list_for_employee() {
        let pool = setup().await;
        insert_employee(&pool, "EMP001").await;
        let repo = SqlChangeRequestRepository::new(pool);

        let request = pending("EMP001", "email", Some("a@x.com"), "b@x.com");
        repo.insert(request.clone()).await.expect("insert");

        let listed =
            repo.list_for_employee(&EmpCode("EMP001".to_string())).await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, request.id);
        assert_eq!(listed[0].old_value.as_deref(), Some("a@x.com"));
        assert_eq!(listed[0].new_value, "b@x.com");
        assert_eq!(listed[0].status, ChangeRequestStatus::Pending);
    }

    #[tokio::test]
    async fn absent_old_value_is_stored_as_null() {
        let pool = setup().await;
        insert_employee(&pool, "EMP001").await;
        let repo = SqlChangeRequestRepository::new(pool.clone());

        repo.insert(pending("EMP001", "nickname", None, "Ash")).await.expect("insert");

        let (null_count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM change_request WHERE old_value IS NULL")
                .fetch_one(&pool)
                .await
                .expect("count nulls");
        assert_eq!(null_count, 1);
    }

    #[tokio::test]
    async fn list_only_returns_requests_for_that_employee() {
        let pool = setup().await;
        insert_employee(&pool, "EMP001").await;
        insert_employee(&pool, "EMP002").await;
        let repo = SqlChangeRequestRepository::new(pool);

        repo.insert(pending("EMP001", "shift", Some("day"), "night")).await.expect("insert 1");
        repo.insert(pending("EMP001", "department", Some("Ops"), "IT")).await.expect("insert 2");
        repo.insert(pending("EMP002", "shift", Some("day"), "night")).await.expect("insert 3");

        let listed =
            repo.list_for_employee(&EmpCode("EMP001".to_string())).await.expect("list");
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|request| request.emp_code.0 == "EMP001"));
    }

    #[tokio::test]
    async fn insert_for_unknown_employee_fails() {
        let repo = SqlChangeRequestRepository::new(setup().await);

        let result = repo.insert(pending("EMP404", "email", None, "b@x.com")).await;

        assert!(result.is_err(), "foreign key should reject orphaned requests");
    }
}
