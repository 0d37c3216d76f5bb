use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod validator;

use crate::cli::Cli;
use crate::snapshot::{PropsConvention, DEFAULT_DATA_KEY};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub log: LogSettings,
    /// How form data is merged into rendered props
    #[serde(default)]
    pub props: PropsSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogSettings {
    /// One of trace, debug, info, warn, error
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl LogSettings {
    pub fn level(&self) -> Result<tracing::Level, anyhow::Error> {
        self.level
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid log level: {}", self.level))
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConventionKind {
    Flat,
    #[default]
    Nested,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PropsSettings {
    #[serde(default)]
    pub convention: ConventionKind,
    /// Key used by the nested convention
    #[serde(default = "default_data_key")]
    pub data_key: String,
}

impl Default for PropsSettings {
    fn default() -> Self {
        Self {
            convention: ConventionKind::default(),
            data_key: default_data_key(),
        }
    }
}

impl PropsSettings {
    pub fn convention(&self) -> PropsConvention {
        match self.convention {
            ConventionKind::Flat => PropsConvention::Flat,
            ConventionKind::Nested => PropsConvention::Nested {
                key: self.data_key.clone(),
            },
        }
    }
}

fn default_data_key() -> String {
    DEFAULT_DATA_KEY.to_string()
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file, env vars, then CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(cli.config.clone())?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Load `miniform.{toml,json,yaml}` from `root`, if present.
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("miniform");
        let settings = Self::load(config_path)?;
        settings.validate()?;
        Ok(settings)
    }

    fn load(config_path: PathBuf) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .set_default("log.level", default_level())?
            .set_default("props.convention", "nested")?
            .set_default("props.data_key", DEFAULT_DATA_KEY)?
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix("MINIFORM")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(level) = &cli.log_level {
            self.log.level = level.clone();
        }
        if let Some(convention) = cli.convention {
            self.props.convention = convention;
        }
        if let Some(key) = &cli.data_key {
            self.props.data_key = key.clone();
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::SettingsValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }
}
