use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinAnalystError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FinAnalystError {
    /// HTTP-style status class for the request boundary.
    ///
    /// Anything the caller can fix by changing the request is a 422; faults
    /// raised while computing are opaque 500s.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput { .. } | Self::MalformedRequest(_) => 422,
            Self::ArithmeticOverflow { .. } | Self::SerializationError(_) => 500,
        }
    }

    /// Name of the offending input field, when the error identifies one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FinAnalystError {
    fn from(e: serde_json::Error) -> Self {
        FinAnalystError::SerializationError(e.to_string())
    }
}
