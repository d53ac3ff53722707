use thiserror::Error;

/// Core domain errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Backend failure: {message}")]
    BackendFailure { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::BackendFailure {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let error = DomainError::invalid_input("query must be a string");
        assert_eq!(error.to_string(), "Invalid input: query must be a string");
    }

    #[test]
    fn test_backend_error() {
        let error = DomainError::backend("timed out after 30s");
        assert_eq!(error.to_string(), "Backend failure: timed out after 30s");
    }

    #[test]
    fn test_errors_are_cloneable_for_fan_out() {
        let error = DomainError::internal("lock poisoned");
        assert_eq!(error.clone(), error);
    }
}
