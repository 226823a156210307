use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmpCode(pub String);

impl EmpCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmpCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A profile held by the record store. Besides the well-known columns an
/// employee may carry any number of extra string attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub emp_code: EmpCode,
    pub name: String,
    pub email: String,
    pub department: String,
    pub shift: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl EmployeeRecord {
    /// Looks up a field by the name a requester would use for it.
    ///
    /// Named columns win over extra attributes with the same key.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "emp_code" => Some(self.emp_code.as_str()),
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "department" => Some(&self.department),
            "shift" => Some(&self.shift),
            other => self.attributes.get(other).map(String::as_str),
        }
    }
}
