use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(
        "validation mismatch in {operation} suite for {candidate}: expected {expected}, actual {actual}"
    )]
    ValidationMismatch {
        operation: String,
        candidate: String,
        expected: String,
        actual: String,
    },
    #[error("measurement error: {0}")]
    Measurement(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("history error: {0}")]
    History(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl HarnessError {
    pub fn mismatch(
        operation: impl Into<String>,
        candidate: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        HarnessError::ValidationMismatch {
            operation: operation.into(),
            candidate: candidate.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn measurement<T: Into<String>>(msg: T) -> Self {
        HarnessError::Measurement(msg.into())
    }

    pub fn store<T: Into<String>>(msg: T) -> Self {
        HarnessError::Store(msg.into())
    }

    pub fn history<T: Into<String>>(msg: T) -> Self {
        HarnessError::History(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        HarnessError::InvalidInput(msg.into())
    }
}
