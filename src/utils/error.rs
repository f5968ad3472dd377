use thiserror::Error;

#[derive(Error, Debug)]
pub enum TalkError {
    #[error("Weighted choice requires at least one candidate")]
    EmptyInput,

    #[error("Invalid weight {weight}: weights must be finite and non-negative")]
    InvalidWeight { weight: f64 },

    #[error("Weighted choice requires at least one positive weight")]
    ZeroTotalWeight,

    #[error(
        "No eligible generator left for slide {slide_index} (seed '{seed}'); excluded: [{}]",
        .excluded.join(", ")
    )]
    NoEligibleGenerator {
        slide_index: usize,
        seed: String,
        excluded: Vec<String>,
    },

    #[error("Invalid slide count {requested}: a presentation needs at least one slide")]
    InvalidSlideCount { requested: usize },

    #[error("Generator name '{name}' is used more than once")]
    DuplicateGenerator { name: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{collaborator} failed: {message}")]
    CollaboratorError {
        collaborator: String,
        message: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Selection,
    Scheduling,
    Collaborator,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TalkError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TalkError::EmptyInput | TalkError::InvalidWeight { .. } | TalkError::ZeroTotalWeight => {
                ErrorCategory::Selection
            }
            TalkError::NoEligibleGenerator { .. }
            | TalkError::InvalidSlideCount { .. }
            | TalkError::DuplicateGenerator { .. } => ErrorCategory::Scheduling,
            TalkError::ApiError(_)
            | TalkError::IoError(_)
            | TalkError::SerializationError(_)
            | TalkError::CollaboratorError { .. } => ErrorCategory::Collaborator,
            TalkError::ConfigError { .. }
            | TalkError::ConfigValidationError { .. }
            | TalkError::InvalidConfigValueError { .. }
            | TalkError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Collaborator => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Scheduling => ErrorSeverity::High,
            ErrorCategory::Selection => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TalkError::NoEligibleGenerator {
                slide_index, seed, ..
            } => format!(
                "Could not produce slide {} about '{}': every generator came back empty",
                slide_index + 1,
                seed
            ),
            TalkError::ApiError(e) => format!("A content service could not be reached: {}", e),
            TalkError::InvalidSlideCount { .. } => {
                "The number of slides must be at least 1".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Selection => {
                "Check the generator weight policies; at least one must be positive for every slide"
            }
            ErrorCategory::Scheduling => {
                "Try another topic or enable more generators in the configuration"
            }
            ErrorCategory::Collaborator => {
                "Check your network connection and API keys, then retry"
            }
            ErrorCategory::Configuration => "Fix the configuration file or command-line arguments",
        }
    }
}

pub type Result<T> = std::result::Result<T, TalkError>;
