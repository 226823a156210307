use std::fmt;
use std::sync::Arc;

use staffdesk_core::domain::change_request::ChangeRequest;
use staffdesk_core::domain::employee::EmpCode;
use staffdesk_core::errors::ApplicationError;
use staffdesk_db::repositories::{ChangeRequestRepository, EmployeeRepository};
use tracing::{debug, info, warn};

use crate::classifier::{Classification, IntentClassifier, MalformedReason};
use crate::llm::LlmClient;

/// Terminal state of one request. `Display` renders the user-facing reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeOutcome {
    EmployeeNotFound,
    NoChange,
    Unchanged { field: String, value: String },
    Logged(ChangeRequest),
    Malformed { raw_text: String, reason: MalformedReason },
    Failed(ApplicationError),
}

impl ChangeOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmployeeNotFound => "employee_not_found",
            Self::NoChange => "no_change",
            Self::Unchanged { .. } => "unchanged",
            Self::Logged(_) => "logged",
            Self::Malformed { .. } => "malformed",
            Self::Failed(_) => "failed",
        }
    }

    /// Diagnostic text that the rendered reply leaves out. Only a malformed
    /// model reply has any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Malformed { raw_text, .. } => Some(raw_text),
            _ => None,
        }
    }
}

impl fmt::Display for ChangeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmployeeNotFound => f.write_str("❌ Employee not found."),
            Self::NoChange => f.write_str("🛑 No change detected."),
            Self::Unchanged { .. } => {
                f.write_str("ℹ️ Requested value is the same as existing. No change logged.")
            }
            Self::Logged(request) => {
                write!(f, "✅ Change request logged: {} ➝ {}", request.field, request.new_value)
            }
            Self::Malformed { reason: MalformedReason::SegmentCount, .. } => {
                f.write_str("⚠️ Invalid response format from LLM")
            }
            Self::Malformed { reason: MalformedReason::UnrecognizedFormat, .. } => {
                f.write_str("⚠️ Unexpected response format from LLM")
            }
            Self::Failed(error) => write!(f, "⚠️ Error processing change request: {error}"),
        }
    }
}

/// Fetch, then classify-and-persist. Holds injected handles so one pipeline
/// serves every request in the process.
pub struct ChangePipeline {
    employees: Arc<dyn EmployeeRepository>,
    change_requests: Arc<dyn ChangeRequestRepository>,
    classifier: IntentClassifier,
}

impl ChangePipeline {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        change_requests: Arc<dyn ChangeRequestRepository>,
        llm: Arc<dyn LlmClient>,
    ) -> Self {
        Self { employees, change_requests, classifier: IntentClassifier::new(llm) }
    }

    /// Runs one request to completion. Every failure is folded into the
    /// returned outcome; at most one change request is written.
    pub async fn run(&self, emp_code: &EmpCode, question: &str) -> ChangeOutcome {
        let employee = match self.employees.find_by_code(emp_code).await {
            Ok(Some(employee)) => employee,
            Ok(None) => {
                info!(
                    event_name = "agent.pipeline.employee_not_found",
                    emp_code = %emp_code,
                    "no employee matches code"
                );
                return ChangeOutcome::EmployeeNotFound;
            }
            Err(error) => {
                warn!(
                    event_name = "agent.pipeline.fetch_failed",
                    emp_code = %emp_code,
                    error = %error,
                    "employee lookup failed"
                );
                return ChangeOutcome::Failed(ApplicationError::Persistence(error.to_string()));
            }
        };

        let classification = match self.classifier.classify(&employee, question).await {
            Ok(classification) => classification,
            Err(error) => {
                warn!(
                    event_name = "agent.pipeline.model_failed",
                    emp_code = %emp_code,
                    error = %error,
                    "classification call failed"
                );
                return ChangeOutcome::Failed(ApplicationError::Integration(error.to_string()));
            }
        };

        let (field, new_value) = match classification {
            Classification::NoChange => return ChangeOutcome::NoChange,
            Classification::Malformed { raw_text, reason } => {
                warn!(
                    event_name = "agent.pipeline.malformed_reply",
                    emp_code = %emp_code,
                    reason = ?reason,
                    raw_text = %raw_text,
                    "model reply did not match the expected grammar"
                );
                return ChangeOutcome::Malformed { raw_text, reason };
            }
            Classification::Change { field, new_value } => (field, new_value),
        };

        let old_value = employee.field(&field).map(str::to_string);
        debug!(
            event_name = "agent.pipeline.change_detected",
            emp_code = %emp_code,
            field = %field,
            old_value = ?old_value,
            new_value = %new_value,
            "detected change request"
        );

        if old_value.as_deref() == Some(new_value.as_str()) {
            return ChangeOutcome::Unchanged { field, value: new_value };
        }

        let request =
            match ChangeRequest::pending(employee.emp_code.clone(), field, old_value, new_value) {
                Ok(request) => request,
                Err(error) => return ChangeOutcome::Failed(error.into()),
            };

        if let Err(error) = self.change_requests.insert(request.clone()).await {
            warn!(
                event_name = "agent.pipeline.persist_failed",
                emp_code = %emp_code,
                error = %error,
                "change request could not be stored"
            );
            return ChangeOutcome::Failed(ApplicationError::Persistence(error.to_string()));
        }

        info!(
            event_name = "agent.pipeline.change_logged",
            emp_code = %emp_code,
            field = %request.field,
            change_request_id = %request.id.0,
            "change request logged"
        );
        ChangeOutcome::Logged(request)
    }
}
