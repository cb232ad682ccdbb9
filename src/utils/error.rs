use thiserror::Error;

#[derive(Error, Debug)]
pub enum PetError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV rendering error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Authentication failed: {message}")]
    AuthError { message: String },

    #[error("Upstream {endpoint} answered with status {status}")]
    UpstreamError { endpoint: String, status: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Authentication,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PetError {
    pub fn config(message: impl Into<String>) -> Self {
        PetError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PetError::ApiError(_) | PetError::UpstreamError { .. } => ErrorCategory::Network,
            PetError::ConfigError { .. }
            | PetError::MissingConfigError { .. }
            | PetError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PetError::AuthError { .. } => ErrorCategory::Authentication,
            PetError::CsvError(_) | PetError::SerializationError(_) => ErrorCategory::Data,
            PetError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Upstream hiccups are worth a retry
            PetError::ApiError(_) | PetError::UpstreamError { .. } => ErrorSeverity::Medium,
            PetError::ConfigError { .. }
            | PetError::MissingConfigError { .. }
            | PetError::InvalidConfigValueError { .. }
            | PetError::AuthError { .. }
            | PetError::CsvError(_)
            | PetError::SerializationError(_) => ErrorSeverity::High,
            PetError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PetError::ApiError(_) => {
                "Check your network connection and try again in a moment".to_string()
            }
            PetError::UpstreamError { status, .. } if *status == 429 => {
                "The API rate limit was hit; wait a minute before retrying".to_string()
            }
            PetError::UpstreamError { .. } => {
                "The pet API is having trouble; retry later".to_string()
            }
            PetError::ConfigError { .. } => {
                "Check the TOML configuration file for syntax errors".to_string()
            }
            PetError::MissingConfigError { field } => {
                format!("Set '{}' in the config file or via its environment variable", field)
            }
            PetError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            PetError::AuthError { .. } => {
                "Verify your Petfinder client id and secret".to_string()
            }
            PetError::CsvError(_) | PetError::SerializationError(_) => {
                "Try a different --format".to_string()
            }
            PetError::IoError(_) => "Check file permissions and disk space".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PetError::ApiError(_) | PetError::UpstreamError { .. } => {
                "Could not reach the pet API".to_string()
            }
            PetError::AuthError { .. } => "Could not sign in to Petfinder".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PetError>;
