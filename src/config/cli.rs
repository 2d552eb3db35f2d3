use crate::config::toml_config::{TargetsConfig, TomlConfig};
use crate::config::PortalConfig;
use crate::utils::error::{PortalError, Result};
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "portal-loader")]
#[command(about = "Render a captive portal's ads and packages from the portal API")]
pub struct CliConfig {
    /// Portal API base URL, ending in '/'
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Location identifier appended to the base URL
    #[arg(long, global = true)]
    pub location_id: Option<String>,

    /// TOML configuration file; flags override its values
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load ads and packages into the portal page and print its HTML
    Render,
    /// Inject API settings into a captive-portal template ZIP
    Bundle {
        #[arg(long)]
        template: PathBuf,

        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Label used in the bundle file name; defaults to the location id
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        support_phone: Option<String>,
    },
}

/// Everything the binary needs after flags, file and environment are merged.
#[derive(Debug, Clone)]
pub struct Settings {
    pub portal: PortalConfig,
    pub targets: TargetsConfig,
    pub support_phone: Option<String>,
    pub verbose: bool,
    pub json_logs: bool,
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Render)
    }

    pub fn resolve(&self) -> Result<Settings> {
        self.resolve_with(PortalConfig::from_env())
    }

    /// Precedence: flags, then the config file, then `env`. File values still
    /// holding an unset `${VAR}` are skipped.
    pub fn resolve_with(&self, env: PortalConfig) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path).map_err(|e| PortalError::ConfigError {
                message: format!("Failed to load {}: {}", path.display(), e),
            })?,
            None => TomlConfig::default(),
        };
        file.validate()?;

        let api_base = self
            .api_base
            .clone()
            .or_else(|| file.portal.api_base().map(str::to_string))
            .unwrap_or(env.api_base);
        let location_id = self
            .location_id
            .clone()
            .or_else(|| file.portal.location_id().map(str::to_string))
            .unwrap_or(env.location_id);

        Ok(Settings {
            portal: PortalConfig::new(api_base, location_id),
            targets: file.targets(),
            support_phone: file.portal.support_phone().map(str::to_string),
            verbose: self.verbose || file.verbose(),
            json_logs: self.log_format == LogFormat::Json || file.json_logs(),
        })
    }
}
