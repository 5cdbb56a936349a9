use thiserror::Error;

/// Malformed raw input. Nothing is ever coerced to a default value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Missing field: {field}")]
    Missing { field: &'static str },
    #[error("Invalid integer for {field}: {value:?}")]
    Integer { field: &'static str, value: String },
    #[error("Invalid boolean for {field}: {value:?}")]
    Boolean { field: &'static str, value: String },
    #[error("Invalid address for {field}: {value:?}")]
    Address { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl EngineError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!(error = %msg, "Rejected inconsistent escrow input");
        EngineError::InvalidInput(msg)
    }
}
