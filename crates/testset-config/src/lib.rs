//! # testset-config
//!
//! Layered configuration loading for the testset tool using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TESTSET_*` prefix, `__` as separator)
//! 2. Project-level `.testset/config.toml`
//! 3. User-level `~/.config/testset-tool/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TESTSET_LAYOUT__METADATA_FILE` -> `layout.metadata_file`,
//! `TESTSET_GENERAL__OUTPUT_FORMAT` -> `general.output_format`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use testset_config::TestSetConfig;
//!
//! let config = TestSetConfig::load_with_dotenv().expect("config");
//! println!("metadata file: {}", config.layout.metadata_file);
//! ```

mod error;
mod general;

pub use error::ConfigError;
pub use general::{GeneralConfig, OutputFormat};

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use testset_core::{Layout, LegacyLayout};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TestSetConfig {
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub legacy: LegacyLayout,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TestSetConfig {
    /// Load and validate configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading a `.env` file from the current
    /// directory, if there is one.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is the normal case.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or stack providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".testset/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("TESTSET_").split("__"))
    }

    /// Reject file names the tree walkers cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("layout.metadata_file", &self.layout.metadata_file),
            ("layout.question_extension", &self.layout.question_extension),
            ("legacy.description_file", &self.legacy.description_file),
            ("legacy.quota_file", &self.legacy.quota_file),
            ("legacy.question_config", &self.legacy.question_config),
            ("legacy.question_section", &self.legacy.question_section),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(invalid(field, "must not be empty"));
            }
        }

        if self.layout.question_extension.contains('.') {
            return Err(invalid(
                "layout.question_extension",
                "must be given without a dot",
            ));
        }
        for (field, value) in [
            ("layout.metadata_file", &self.layout.metadata_file),
            ("legacy.description_file", &self.legacy.description_file),
            ("legacy.quota_file", &self.legacy.quota_file),
            ("legacy.question_config", &self.legacy.question_config),
        ] {
            if value.contains(['/', '\\']) {
                return Err(invalid(field, "must be a plain file name"));
            }
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("testset-tool").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
