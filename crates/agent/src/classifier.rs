//! Turns a free-text request into a structured change decision.
//!
//! The model is asked to answer in one of two strict textual forms:
//! `NO_CHANGE` or `CHANGE|<field_name>|<new_value>`. Anything else is kept
//! verbatim as a malformed reply so the caller can report it.

use std::sync::Arc;

use staffdesk_core::domain::employee::EmployeeRecord;

use crate::llm::{LlmClient, LlmError};

pub const NO_CHANGE_REPLY: &str = "NO_CHANGE";
pub const CHANGE_REPLY_PREFIX: &str = "CHANGE|";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MalformedReason {
    /// `CHANGE|` reply that did not split into exactly three segments.
    SegmentCount,
    UnrecognizedFormat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    NoChange,
    Change { field: String, new_value: String },
    Malformed { raw_text: String, reason: MalformedReason },
}

pub fn render_prompt(employee: &EmployeeRecord, question: &str) -> String {
    format!(
        r#"
You are an employee data change detection system. Analyze the following:

Employee Data:
- Name: {name}
- Email: {email}
- Department: {department}
- Shift: {shift}

User Request: "{question}"

If the user is requesting a change to any field, respond EXACTLY in this format:
CHANGE|field_name|new_value

If no change is requested, respond EXACTLY with:
NO_CHANGE

Examples:
- For email change: CHANGE|email|new.email@example.com
- For department change: CHANGE|department|IT
- For no change: NO_CHANGE
"#,
        name = employee.name,
        email = employee.email,
        department = employee.department,
        shift = employee.shift,
    )
}

/// Parses a model reply. Never fails: unrecognised text becomes `Malformed`,
/// carrying the reply exactly as received.
pub fn parse_classification(raw: &str) -> Classification {
    let text = raw.trim();

    if text.starts_with(CHANGE_REPLY_PREFIX) {
        let segments = text.split('|').collect::<Vec<_>>();
        return match segments.as_slice() {
            [_, field, new_value] => Classification::Change {
                field: field.trim().to_string(),
                new_value: new_value.trim().to_string(),
            },
            _ => Classification::Malformed {
                raw_text: raw.to_string(),
                reason: MalformedReason::SegmentCount,
            },
        };
    }

    if text == NO_CHANGE_REPLY {
        return Classification::NoChange;
    }

    Classification::Malformed {
        raw_text: raw.to_string(),
        reason: MalformedReason::UnrecognizedFormat,
    }
}

#[derive(Clone)]
pub struct IntentClassifier {
    llm: Arc<dyn LlmClient>,
}

impl IntentClassifier {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// One model call, no retries. Only a failed call is an error; any reply
    /// text, however odd, classifies.
    pub async fn classify(
        &self,
        employee: &EmployeeRecord,
        question: &str,
    ) -> Result<Classification, LlmError> {
        let prompt = render_prompt(employee, question);
        let reply = self.llm.complete(&prompt).await?;
        Ok(parse_classification(&reply))
    }
}
