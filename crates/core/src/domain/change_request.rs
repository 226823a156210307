use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::employee::EmpCode;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeRequestId(pub String);

impl ChangeRequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Lifecycle of a change request. Only `Pending` is ever written here;
/// the other states belong to whoever reviews the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl ChangeRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ChangeRequestStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::InvariantViolation(format!(
                "unknown change request status `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub id: ChangeRequestId,
    pub emp_code: EmpCode,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: String,
    pub status: ChangeRequestStatus,
    pub created_at: DateTime<Utc>,
}

impl ChangeRequest {
    /// Builds a pending request, refusing one that would not change anything.
    pub fn pending(
        emp_code: EmpCode,
        field: impl Into<String>,
        old_value: Option<String>,
        new_value: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let field = field.into();
        let new_value = new_value.into();

        if old_value.as_deref() == Some(new_value.as_str()) {
            return Err(DomainError::InvariantViolation(format!(
                "change request for `{field}` does not change the stored value"
            )));
        }

        Ok(Self {
            id: ChangeRequestId::generate(),
            emp_code,
            field,
            old_value,
            new_value,
            status: ChangeRequestStatus::Pending,
            created_at: Utc::now(),
        })
    }
}
