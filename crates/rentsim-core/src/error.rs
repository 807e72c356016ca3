use thiserror::Error;

#[derive(Debug, Error)]
pub enum RentSimError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Incomplete configuration: {0}")]
    Configuration(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<serde_json::Error> for RentSimError {
    fn from(e: serde_json::Error) -> Self {
        RentSimError::SerializationError(e.to_string())
    }
}
