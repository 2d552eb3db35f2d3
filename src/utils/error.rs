use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Missing configuration value: {field}")]
    MissingConfig { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Render target not found: {target}")]
    MissingTarget { target: String },

    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bundle error: {0}")]
    Bundle(#[from] zip::result::ZipError),

    #[error("Template entry {entry} is not valid UTF-8")]
    TemplateEncoding { entry: String },
}

/// Where an error originated. Pre-request categories abort a load before
/// anything is dispatched; the rest render the failure fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Target,
    Network,
    Status,
    Decode,
    Storage,
}

impl PortalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PortalError::MissingConfig { .. }
            | PortalError::InvalidConfigValue { .. }
            | PortalError::ConfigError { .. } => ErrorCategory::Configuration,
            PortalError::MissingTarget { .. } => ErrorCategory::Target,
            PortalError::Http(_) => ErrorCategory::Network,
            PortalError::Status { .. } => ErrorCategory::Status,
            PortalError::Decode(_) => ErrorCategory::Decode,
            PortalError::Io(_) | PortalError::Bundle(_) | PortalError::TemplateEncoding { .. } => {
                ErrorCategory::Storage
            }
        }
    }

    pub fn is_pre_request(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Configuration | ErrorCategory::Target
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Portal configuration is incomplete: {}", self),
            ErrorCategory::Target => format!("The page is missing a required element: {}", self),
            ErrorCategory::Network => "Could not reach the portal API".to_string(),
            ErrorCategory::Status => format!("The portal API rejected the request: {}", self),
            ErrorCategory::Decode => "The portal API returned an unexpected payload".to_string(),
            ErrorCategory::Storage => format!("Could not read or write portal files: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Set api_base and location_id via flags or the [portal] section of the config file"
            }
            ErrorCategory::Target => "Check the container ids passed to the loader",
            ErrorCategory::Network => "Check that the API host is reachable",
            ErrorCategory::Status => "Check that the location id exists and is active",
            ErrorCategory::Decode => "Check that api_base points at the portal data endpoint",
            ErrorCategory::Storage => "Check the template path and output directory permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
