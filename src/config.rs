//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/citytree/citytree.toml`
//! 3. Local config: `<dir>/.citytree.toml` (usually the working directory)
//! 4. Environment variables: `CITYTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, MAX_MONEY_DECIMALS, MAX_PERCENT_ACCURACY};

/// Currency formatting defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MoneyConfig {
    /// Fraction digits printed by `money`
    pub decimals: usize,
}

impl Default for MoneyConfig {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

/// Percentage formatting defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PercentConfig {
    /// Fraction digits printed by `percent` (truncated, not rounded)
    pub accuracy: usize,
}

impl Default for PercentConfig {
    fn default() -> Self {
        Self { accuracy: 2 }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub money: RawMoneyConfig,
    pub percent: RawPercentConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawMoneyConfig {
    pub decimals: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawPercentConfig {
    pub accuracy: Option<usize>,
}

/// Unified configuration for citytree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Forest file used when `--data` is not given (default: bundled city data)
    pub data_file: Option<PathBuf>,
    /// Currency formatting
    pub money: MoneyConfig,
    /// Percentage formatting
    pub percent: PercentConfig,
}

/// Get the XDG config directory for citytree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "citytree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("citytree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".citytree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(data_file) = &self.data_file {
            let expanded = expand_env_vars(data_file.to_string_lossy().as_ref());
            self.data_file = Some(PathBuf::from(expanded));
        }
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay.data_file.clone().or_else(|| self.data_file.clone()),
            money: MoneyConfig {
                decimals: overlay.money.decimals.unwrap_or(self.money.decimals),
            },
            percent: PercentConfig {
                accuracy: overlay.percent.accuracy.unwrap_or(self.percent.accuracy),
            },
        }
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.money.decimals > MAX_MONEY_DECIMALS {
            return Err(ApplicationError::Config {
                message: format!(
                    "money.decimals must be at most {}, got {}",
                    MAX_MONEY_DECIMALS, self.money.decimals
                ),
            });
        }
        if self.percent.accuracy > MAX_PERCENT_ACCURACY {
            return Err(ApplicationError::Config {
                message: format!(
                    "percent.accuracy must be at most {}, got {}",
                    MAX_PERCENT_ACCURACY, self.percent.accuracy
                ),
            });
        }
        Ok(())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.citytree.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/citytree/citytree.toml`
    /// 3. Local config: `<local_dir>/.citytree.toml`
    /// 4. Environment variables: `CITYTREE_*` prefix, `__` between sections
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        let local = local_dir.map(local_config_path).filter(|p| p.exists());
        Self::load_from(global.as_deref(), local.as_deref())
    }

    /// Load settings from explicit config files (either may be absent).
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            let raw = load_raw_settings(global_path)?;
            current = current.merge_with(&raw);
        }

        // 3. Local config
        if let Some(local_path) = local {
            let raw = load_raw_settings(local_path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply CITYTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let builder = Config::builder().add_source(
            Environment::with_prefix("CITYTREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = Some(PathBuf::from(val));
        }
        if let Some(val) = env_value::<usize>(&config, "money.decimals")? {
            settings.money.decimals = val;
        }
        if let Some(val) = env_value::<usize>(&config, "percent.accuracy")? {
            settings.percent.accuracy = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# citytree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/citytree/citytree.toml
#   Local:  ./.citytree.toml
#   Env:    CITYTREE_* environment variables (e.g. CITYTREE_MONEY__DECIMALS=3)

# Forest file (.json or .toml) used when --data is not given.
# Unset means the bundled city dataset.
# data_file = "~/data/cities.json"

[money]
# Fraction digits for `citytree money`
# decimals = 2

[percent]
# Fraction digits for `citytree percent` (truncated)
# accuracy = 2
"#
        .to_string()
    }
}

/// Typed env value: unset is `None`, an unparsable value is an error.
fn env_value<T: DeserializeOwned>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("environment override {}: {}", key, e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
