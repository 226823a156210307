use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("integration failure: {0}")]
    Integration(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable, machine-readable class used in structured command output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "domain",
            Self::Persistence(_) => "persistence",
            Self::Integration(_) => "integration",
            Self::Configuration(_) => "configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, DomainError};

    #[test]
    fn domain_error_converts_into_application_error() {
        let error = ApplicationError::from(DomainError::InvariantViolation(
            "value unchanged".to_owned(),
        ));

        assert_eq!(error.error_class(), "domain");
        assert_eq!(error.to_string(), "domain invariant violation: value unchanged");
    }

    #[test]
    fn persistence_error_keeps_detail_in_message() {
        let error = ApplicationError::Persistence("database is locked".to_owned());

        assert_eq!(error.error_class(), "persistence");
        assert_eq!(error.to_string(), "persistence failure: database is locked");
    }

    #[test]
    fn integration_error_has_integration_class() {
        let error = ApplicationError::Integration("model timed out".to_owned());

        assert_eq!(error.error_class(), "integration");
    }
}
