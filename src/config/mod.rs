#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_base_path, validate_non_empty_string, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::env;

pub const API_BASE_ENV: &str = "PORTAL_API_BASE";
pub const LOCATION_ID_ENV: &str = "LOCATION_UUID";

/// Where the portal API lives and which location to ask it about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    pub api_base: String,
    pub location_id: String,
}

impl PortalConfig {
    pub fn new(api_base: impl Into<String>, location_id: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            location_id: location_id.into(),
        }
    }

    /// Reads `PORTAL_API_BASE` and `LOCATION_UUID`; unset variables become
    /// empty strings and are reported by `validate`.
    pub fn from_env() -> Self {
        Self {
            api_base: env::var(API_BASE_ENV).unwrap_or_default(),
            location_id: env::var(LOCATION_ID_ENV).unwrap_or_default(),
        }
    }
}

impl ConfigProvider for PortalConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn location_id(&self) -> &str {
        &self.location_id
    }
}

impl Validate for PortalConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_base_path("api_base", &self.api_base)?;
        validate_non_empty_string("location_id", &self.location_id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PortalError;

    #[test]
    fn test_valid_config() {
        let config = PortalConfig::new("https://billing.example.com/api/portal/", "5b0c");
        assert!(config.validate().is_ok());
        assert_eq!(config.api_base(), "https://billing.example.com/api/portal/");
        assert_eq!(config.location_id(), "5b0c");
    }

    #[test]
    fn test_missing_values_are_reported() {
        let config = PortalConfig::new("https://billing.example.com/api/portal/", "");
        assert!(matches!(
            config.validate(),
            Err(PortalError::MissingConfig { field }) if field == "location_id"
        ));

        let config = PortalConfig::new("", "5b0c");
        assert!(matches!(
            config.validate(),
            Err(PortalError::MissingConfig { field }) if field == "api_base"
        ));
    }

    #[test]
    fn test_from_env() {
        std::env::set_var(API_BASE_ENV, "http://10.0.0.1/api/portal/");
        std::env::set_var(LOCATION_ID_ENV, "env-loc");

        let config = PortalConfig::from_env();
        assert_eq!(config.api_base, "http://10.0.0.1/api/portal/");
        assert_eq!(config.location_id, "env-loc");

        std::env::remove_var(API_BASE_ENV);
        std::env::remove_var(LOCATION_ID_ENV);
    }
}
