use thiserror::Error;

#[derive(Error, Debug)]
pub enum RentalError {
    #[error("Validation error on '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Failed to save reservations to {path}: {source}")]
    PersistenceError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid import format: {message}")]
    FormatError { message: String },

    #[error("Corrupt reservations document: {message}")]
    ParseError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RentalError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        RentalError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        RentalError::FormatError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RentalError::ValidationError { .. } | RentalError::FormatError { .. } => {
                ErrorCategory::Input
            }
            RentalError::PersistenceError { .. }
            | RentalError::ParseError { .. }
            | RentalError::IoError(_)
            | RentalError::SerializationError(_) => ErrorCategory::Storage,
            RentalError::ConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Recovered by treating the document as empty.
            RentalError::ParseError { .. } => ErrorSeverity::Low,
            // In-memory state survives, the save can be retried.
            RentalError::PersistenceError { .. } => ErrorSeverity::Medium,
            RentalError::ValidationError { .. }
            | RentalError::FormatError { .. }
            | RentalError::ConfigError { .. } => ErrorSeverity::High,
            RentalError::IoError(_) | RentalError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RentalError::ValidationError { field, .. } => {
                format!("Check the value given for '{}' and submit again", field)
            }
            RentalError::PersistenceError { path, .. } => format!(
                "Make sure {} is writable; the change is kept in memory until saved",
                path
            ),
            RentalError::FormatError { .. } => {
                "The import file must contain a JSON array of reservations".to_string()
            }
            RentalError::ParseError { .. } => {
                "Restore the reservations file from an exported backup".to_string()
            }
            RentalError::ConfigError { .. } => {
                "Review the settings file and command line flags".to_string()
            }
            RentalError::IoError(_) => "Check file paths and permissions".to_string(),
            RentalError::SerializationError(_) => {
                "Verify the reservation data is valid JSON".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RentalError::ValidationError { message, .. } => message.clone(),
            RentalError::PersistenceError { .. } => "Error while saving reservations".to_string(),
            RentalError::FormatError { .. } => "Invalid file format".to_string(),
            RentalError::ParseError { .. } => "Reservations file is corrupt".to_string(),
            RentalError::ConfigError { message } => format!("Configuration problem: {}", message),
            RentalError::IoError(e) => format!("File access failed: {}", e),
            RentalError::SerializationError(e) => format!("Could not encode data: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, RentalError>;
