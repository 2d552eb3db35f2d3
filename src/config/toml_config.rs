use crate::dom::{ADS_CONTAINER_ID, PACKAGES_TABLE_ID};
use crate::utils::error::{PortalError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub portal: PortalSection,
    pub targets: Option<TargetsConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalSection {
    pub api_base: Option<String>,
    pub location_id: Option<String>,
    pub support_phone: Option<String>,
}

impl PortalSection {
    pub fn api_base(&self) -> Option<&str> {
        resolved(&self.api_base)
    }

    pub fn location_id(&self) -> Option<&str> {
        resolved(&self.location_id)
    }

    pub fn support_phone(&self) -> Option<&str> {
        resolved(&self.support_phone)
    }
}

/// A value whose `${VAR}` survived substitution names an unset variable and
/// counts as absent.
fn resolved(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !has_placeholder(v))
}

fn has_placeholder(value: &str) -> bool {
    value
        .find("${")
        .is_some_and(|start| value[start..].contains('}'))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetsConfig {
    pub ads_container: Option<String>,
    pub packages_table: Option<String>,
}

impl TargetsConfig {
    pub fn ads_container(&self) -> &str {
        self.ads_container.as_deref().unwrap_or(ADS_CONTAINER_ID)
    }

    pub fn packages_table(&self) -> &str {
        self.packages_table.as_deref().unwrap_or(PACKAGES_TABLE_ID)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    /// `text` or `json`
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PortalError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PortalError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PORTAL_API_BASE})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PortalError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn targets(&self) -> TargetsConfig {
        self.targets.clone().unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

/// Checks the file's own settings; portal values are validated after they
/// are merged with flags and the environment.
impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            if !["text", "json"].contains(&format.to_ascii_lowercase().as_str()) {
                return Err(PortalError::InvalidConfigValue {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: text, json".to_string(),
                });
            }
        }

        Ok(())
    }
}
