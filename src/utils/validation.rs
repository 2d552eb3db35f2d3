use crate::utils::error::{PortalError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PortalError::MissingConfig {
            field: field_name.to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PortalError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PortalError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Empty and whitespace-only strings count as missing.
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PortalError::MissingConfig {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

/// Endpoints are built by plain concatenation, so a base without a trailing
/// slash would glue the location id onto the last path segment.
pub fn validate_base_path(field_name: &str, value: &str) -> Result<()> {
    if !value.ends_with('/') {
        return Err(PortalError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Base URL must end with '/'".to_string(),
        });
    }
    Ok(())
}
