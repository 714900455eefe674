use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    StatusError { url: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid selector '{selector}': {message}")]
    SelectorError { selector: String, message: String },
}

impl WidgetError {
    /// Whether the failure came from talking to the storefront rather than from local setup.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            WidgetError::HttpError(_)
                | WidgetError::StatusError { .. }
                | WidgetError::SerializationError(_)
                | WidgetError::MalformedResponse { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            WidgetError::HttpError(_) | WidgetError::StatusError { .. } => {
                "The store could not be reached. Please try again.".to_string()
            }
            WidgetError::SerializationError(_) | WidgetError::MalformedResponse { .. } => {
                "The store returned an unexpected response.".to_string()
            }
            WidgetError::IoError(e) => format!("File access failed: {}", e),
            WidgetError::ConfigError { message } => format!("Configuration problem: {}", message),
            WidgetError::MissingConfigError { field } => {
                format!("Configuration is missing '{}'", field)
            }
            WidgetError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            WidgetError::SelectorError { selector, .. } => {
                format!("Selector '{}' could not be parsed", selector)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, WidgetError>;
