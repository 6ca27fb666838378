use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanMatchError {
    #[error("Invalid profile: {field} — {reason}")]
    InvalidProfile { field: String, reason: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown loan type '{0}'")]
    UnknownLoanType(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanMatchError {
    fn from(e: serde_json::Error) -> Self {
        LoanMatchError::SerializationError(e.to_string())
    }
}
